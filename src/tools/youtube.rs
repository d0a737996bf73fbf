use async_trait::async_trait;
use chrono::{Duration, SecondsFormat, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::config::{Config, Credential, DEFAULT_YOUTUBE_API_URL};
use crate::error::{HiveError, Result};
use crate::traits::{Capability, Tool};

pub const YOUTUBE_SEARCH: &str = "youtube_search";

const MAX_RESULTS_LIMIT: u32 = 50;
const DEFAULT_ORDER: &str = "viewCount";

static SEARCH_ORDERS: phf::Set<&'static str> = phf::phf_set! {
    "date",
    "rating",
    "relevance",
    "title",
    "videoCount",
    "viewCount",
};

#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub query: String,
    pub max_results: u32,
    pub order: String,
    pub published_within_days: u32,
    pub channel_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoSummary {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub published_at: String,
    pub description: String,
}

impl VideoSummary {
    pub fn url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    published_at: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// Searches YouTube Data API v3 for videos.
pub struct YoutubeSearchTool {
    client: Client,
    credential: Credential,
    base_url: String,
    default_max_results: u32,
    default_published_within_days: u32,
}

impl YoutubeSearchTool {
    pub fn new(credential: Credential) -> Self {
        YoutubeSearchTool {
            client: Client::new(),
            credential,
            base_url: DEFAULT_YOUTUBE_API_URL.to_string(),
            default_max_results: 10,
            default_published_within_days: 30,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        YoutubeSearchTool {
            base_url: config.youtube_api_url.clone(),
            default_max_results: config.youtube_max_results.clamp(1, MAX_RESULTS_LIMIT),
            default_published_within_days: config.youtube_published_within_days,
            ..Self::new(config.youtube_api_key.clone())
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn parse_args(&self, args: &serde_json::Value) -> Result<SearchParams> {
        let query = args["query"].as_str().map(str::trim).unwrap_or("");
        if query.is_empty() {
            return Err(HiveError::Tool("missing required argument 'query'".to_string()));
        }

        let order = match args["order"].as_str() {
            Some(order) if SEARCH_ORDERS.contains(order) => order.to_string(),
            Some(order) => {
                let mut allowed: Vec<_> = SEARCH_ORDERS.iter().copied().collect();
                allowed.sort_unstable();
                return Err(HiveError::Tool(format!(
                    "unsupported order '{}', expected one of: {}",
                    order,
                    allowed.join(", ")
                )));
            }
            None => DEFAULT_ORDER.to_string(),
        };

        let max_results = args["max_results"]
            .as_u64()
            .map(|n| n.clamp(1, MAX_RESULTS_LIMIT as u64) as u32)
            .unwrap_or(self.default_max_results);

        let published_within_days = args["published_within_days"]
            .as_u64()
            .map(|n| n.min(u32::MAX as u64) as u32)
            .unwrap_or(self.default_published_within_days);

        let channel_id = args["channel_id"]
            .as_str()
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        Ok(SearchParams {
            query: query.to_string(),
            max_results,
            order,
            published_within_days,
            channel_id,
        })
    }

    fn search_url(&self, params: &SearchParams) -> Result<Url> {
        let mut pairs = vec![
            ("part", "snippet".to_string()),
            ("type", "video".to_string()),
            ("q", params.query.clone()),
            ("order", params.order.clone()),
            ("maxResults", params.max_results.to_string()),
            ("key", self.credential.expose().to_string()),
        ];

        if params.published_within_days > 0 {
            let window = Duration::days(params.published_within_days as i64);
            if let Some(since) = Utc::now().checked_sub_signed(window) {
                pairs.push(("publishedAfter", since.to_rfc3339_opts(SecondsFormat::Secs, true)));
            }
        }
        if let Some(channel_id) = &params.channel_id {
            pairs.push(("channelId", channel_id.clone()));
        }

        let endpoint = format!("{}/search", self.base_url.trim_end_matches('/'));
        Url::parse_with_params(&endpoint, &pairs)
            .map_err(|e| HiveError::Tool(format!("invalid YouTube API URL '{}': {}", endpoint, e)))
    }

    pub async fn search(&self, params: &SearchParams) -> Result<Vec<VideoSummary>> {
        info!(query = %params.query, order = %params.order, max = params.max_results, "youtube search");

        let response = self.client.get(self.search_url(params)?).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|parsed| parsed.error.message)
                .unwrap_or(body);
            return Err(HiveError::YouTube {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SearchResponse = serde_json::from_str(&body)?;
        Ok(parsed
            .items
            .into_iter()
            .filter_map(|item| {
                Some(VideoSummary {
                    video_id: item.id.video_id?,
                    title: item.snippet.title,
                    channel_title: item.snippet.channel_title,
                    published_at: item.snippet.published_at,
                    description: item.snippet.description,
                })
            })
            .collect())
    }
}

pub fn render_results(query: &str, videos: &[VideoSummary]) -> String {
    if videos.is_empty() {
        return format!("No videos found for \"{}\".", query);
    }

    videos
        .iter()
        .enumerate()
        .map(|(i, video)| {
            let mut entry = format!(
                "{}. {} ({}, {})\n   {}",
                i + 1,
                video.title,
                video.channel_title,
                video.published_at,
                video.url()
            );
            if !video.description.is_empty() {
                entry.push_str("\n   ");
                entry.push_str(&video.description);
            }
            entry
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl Capability for YoutubeSearchTool {
    fn name(&self) -> &'static str {
        YOUTUBE_SEARCH
    }

    fn definition(&self) -> Tool {
        Tool::function(
            YOUTUBE_SEARCH,
            "Search YouTube for recent videos matching a query, ranked by views by default",
            json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search terms, e.g. a niche or topic"
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Number of videos to return (1-50)"
                    },
                    "order": {
                        "type": "string",
                        "enum": ["viewCount", "date", "rating", "relevance", "title", "videoCount"],
                        "description": "Ranking of the results"
                    },
                    "published_within_days": {
                        "type": "integer",
                        "description": "Only include videos published in the last N days (0 for any time)"
                    },
                    "channel_id": {
                        "type": "string",
                        "description": "Restrict the search to one channel"
                    }
                },
                "required": ["query"]
            }),
        )
    }

    async fn call(&self, args: &serde_json::Value) -> Result<String> {
        let params = self.parse_args(args)?;
        let videos = self.search(&params).await?;
        Ok(render_results(&params.query, &videos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> YoutubeSearchTool {
        YoutubeSearchTool::new(Credential::new("key"))
    }

    #[test]
    fn from_config_binds_key_and_defaults() {
        let lookup = |key: &str| match key {
            "YOUTUBE_API_KEY" => Some("from-env".to_string()),
            "YOUTUBE_MAX_RESULTS" => Some("99".to_string()),
            "YOUTUBE_PUBLISHED_WITHIN_DAYS" => Some("0".to_string()),
            _ => None,
        };
        let config = Config::from_lookup(lookup, &mut Vec::<u8>::new()).unwrap();
        let tool = YoutubeSearchTool::from_config(&config);
        let params = tool.parse_args(&json!({"query": "q"})).unwrap();

        assert_eq!(tool.credential().expose(), "from-env");
        assert_eq!(params.max_results, 50);
        assert_eq!(params.published_within_days, 0);
        assert_eq!(tool.definition().function.name, YOUTUBE_SEARCH);
    }

    #[test]
    fn query_is_required() {
        assert!(matches!(tool().parse_args(&json!({})), Err(HiveError::Tool(_))));
        assert!(matches!(tool().parse_args(&json!({"query": "  "})), Err(HiveError::Tool(_))));
    }

    #[test]
    fn defaults_fill_optional_args() {
        let params = tool().parse_args(&json!({"query": "ai agents"})).unwrap();

        assert_eq!(
            params,
            SearchParams {
                query: "ai agents".to_string(),
                max_results: 10,
                order: "viewCount".to_string(),
                published_within_days: 30,
                channel_id: None,
            }
        );
    }

    #[test]
    fn max_results_is_clamped() {
        let high = tool().parse_args(&json!({"query": "q", "max_results": 500})).unwrap();
        let low = tool().parse_args(&json!({"query": "q", "max_results": 0})).unwrap();

        assert_eq!(high.max_results, 50);
        assert_eq!(low.max_results, 1);
    }

    #[test]
    fn unknown_order_is_rejected() {
        let err = tool()
            .parse_args(&json!({"query": "q", "order": "trending"}))
            .unwrap_err();
        assert!(err.to_string().contains("unsupported order 'trending'"));

        let ok = tool().parse_args(&json!({"query": "q", "order": "date"})).unwrap();
        assert_eq!(ok.order, "date");
    }

    #[test]
    fn url_carries_key_and_filters() {
        let tool = tool().with_base_url("http://localhost:9/v3/");
        let params = tool
            .parse_args(&json!({"query": "rust async", "channel_id": "UC123", "published_within_days": 7}))
            .unwrap();
        let url = tool.search_url(&params).unwrap();
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(url.path(), "/v3/search");
        assert!(query.contains(&("q".to_string(), "rust async".to_string())));
        assert!(query.contains(&("key".to_string(), "key".to_string())));
        assert!(query.contains(&("channelId".to_string(), "UC123".to_string())));
        assert!(query.iter().any(|(k, _)| k == "publishedAfter"));
    }

    #[test]
    fn zero_days_drops_date_filter() {
        let tool = tool();
        let params = tool
            .parse_args(&json!({"query": "q", "published_within_days": 0}))
            .unwrap();
        let url = tool.search_url(&params).unwrap();

        assert!(!url.query_pairs().any(|(k, _)| k == "publishedAfter"));
    }

    #[test]
    fn renders_numbered_list() {
        let videos = vec![
            VideoSummary {
                video_id: "abc".to_string(),
                title: "Agents in 10 minutes".to_string(),
                channel_title: "Tech Channel".to_string(),
                published_at: "2026-10-01T00:00:00Z".to_string(),
                description: "A quick tour".to_string(),
            },
            VideoSummary {
                video_id: "def".to_string(),
                title: "Automate everything".to_string(),
                channel_title: "Ops".to_string(),
                published_at: "2026-10-02T00:00:00Z".to_string(),
                description: String::new(),
            },
        ];

        let text = render_results("ai", &videos);

        assert_eq!(
            text,
            "1. Agents in 10 minutes (Tech Channel, 2026-10-01T00:00:00Z)\n   https://www.youtube.com/watch?v=abc\n   A quick tour\n2. Automate everything (Ops, 2026-10-02T00:00:00Z)\n   https://www.youtube.com/watch?v=def"
        );
        assert_eq!(render_results("ai", &[]), "No videos found for \"ai\".");
    }
}
