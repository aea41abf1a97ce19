//! The fixed action table
//!
//! Every UI trigger maps to exactly one [`ActionConfig`]: which fields feed
//! which payload keys, where the request goes, which response key holds the
//! text to show, and what to show when the call fails.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::platform::{FieldKind, InputField, Platform};

/// One content-generation operation exposed by a UI control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    YoutubeGenerateScript,
    YoutubeSuggestChannelName,
    YoutubeSuggestNiche,
    YoutubeGenerateVideoIdeas,
    YoutubeGeneratePostContent,
    XGenerateTweet,
    InstagramGeneratePost,
    InstagramGenerateStory,
    InstagramSuggestChannelName,
    InstagramGenerateVideoIdeas,
    InstagramSuggestNiche,
    InstagramGenerateReelIdeas,
    InstagramGenerateVideoScript,
    EmailGenerateEmail,
}

impl ActionId {
    /// All actions, grouped by platform in panel order
    pub const ALL: [ActionId; 14] = [
        ActionId::YoutubeGenerateScript,
        ActionId::YoutubeSuggestChannelName,
        ActionId::YoutubeSuggestNiche,
        ActionId::YoutubeGenerateVideoIdeas,
        ActionId::YoutubeGeneratePostContent,
        ActionId::XGenerateTweet,
        ActionId::InstagramGeneratePost,
        ActionId::InstagramGenerateStory,
        ActionId::InstagramSuggestChannelName,
        ActionId::InstagramGenerateVideoIdeas,
        ActionId::InstagramSuggestNiche,
        ActionId::InstagramGenerateReelIdeas,
        ActionId::InstagramGenerateVideoScript,
        ActionId::EmailGenerateEmail,
    ];

    pub fn platform(&self) -> Platform {
        use ActionId::*;
        match self {
            YoutubeGenerateScript
            | YoutubeSuggestChannelName
            | YoutubeSuggestNiche
            | YoutubeGenerateVideoIdeas
            | YoutubeGeneratePostContent => Platform::Video,
            XGenerateTweet => Platform::Microblog,
            InstagramGeneratePost
            | InstagramGenerateStory
            | InstagramSuggestChannelName
            | InstagramGenerateVideoIdeas
            | InstagramSuggestNiche
            | InstagramGenerateReelIdeas
            | InstagramGenerateVideoScript => Platform::Photo,
            EmailGenerateEmail => Platform::Email,
        }
    }

    /// Stable kebab-case name used on the command line
    pub fn name(&self) -> &'static str {
        use ActionId::*;
        match self {
            YoutubeGenerateScript => "youtube-generate-script",
            YoutubeSuggestChannelName => "youtube-suggest-channel-name",
            YoutubeSuggestNiche => "youtube-suggest-niche",
            YoutubeGenerateVideoIdeas => "youtube-generate-video-ideas",
            YoutubeGeneratePostContent => "youtube-generate-post-content",
            XGenerateTweet => "x-generate-tweet",
            InstagramGeneratePost => "instagram-generate-post",
            InstagramGenerateStory => "instagram-generate-story",
            InstagramSuggestChannelName => "instagram-suggest-channel-name",
            InstagramGenerateVideoIdeas => "instagram-generate-video-ideas",
            InstagramSuggestNiche => "instagram-suggest-niche",
            InstagramGenerateReelIdeas => "instagram-generate-reel-ideas",
            InstagramGenerateVideoScript => "instagram-generate-video-script",
            EmailGenerateEmail => "email-generate-email",
        }
    }

    /// Button label shown in the actions panel
    pub fn label(&self) -> &'static str {
        use ActionId::*;
        match self {
            YoutubeGenerateScript => "Generate Script",
            YoutubeSuggestChannelName => "Suggest Channel Name",
            YoutubeSuggestNiche => "Suggest Niche",
            YoutubeGenerateVideoIdeas => "Generate Video Ideas",
            YoutubeGeneratePostContent => "Generate Post Content",
            XGenerateTweet => "Generate Tweet",
            InstagramGeneratePost => "Generate Post",
            InstagramGenerateStory => "Generate Story",
            InstagramSuggestChannelName => "Suggest Channel Name",
            InstagramGenerateVideoIdeas => "Generate Video Ideas",
            InstagramSuggestNiche => "Suggest Niche",
            InstagramGenerateReelIdeas => "Generate Reel Ideas",
            InstagramGenerateVideoScript => "Generate Video Script",
            EmailGenerateEmail => "Generate Email",
        }
    }

    /// Actions belonging to `platform`, in panel order
    pub fn for_platform(platform: Platform) -> impl Iterator<Item = ActionId> {
        Self::ALL.into_iter().filter(move |a| a.platform() == platform)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| format!("unknown action: {}", s))
    }
}

/// Which on-screen field feeds which payload key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub input: FieldKind,
    pub key: &'static str,
    /// Required fields are forwarded as-is even when empty
    pub required: bool,
    /// Literal substituted when an optional field is empty; `None` means `null`
    pub default: Option<&'static str>,
}

impl FieldSpec {
    pub const fn required(input: FieldKind, key: &'static str) -> Self {
        Self { input, key, required: true, default: None }
    }

    pub const fn optional(input: FieldKind, key: &'static str) -> Self {
        Self { input, key, required: false, default: None }
    }

    pub const fn with_default(input: FieldKind, key: &'static str, default: &'static str) -> Self {
        Self { input, key, required: false, default: Some(default) }
    }
}

/// Static descriptor binding an action to its endpoint, field mapping and
/// response extraction rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionConfig {
    pub action: ActionId,
    pub platform: Platform,
    pub endpoint_path: &'static str,
    pub field_specs: Vec<FieldSpec>,
    pub response_field: &'static str,
    pub error_text: &'static str,
    pub output_area: String,
}

impl ActionConfig {
    fn new(
        action: ActionId,
        endpoint_path: &'static str,
        field_specs: Vec<FieldSpec>,
        response_field: &'static str,
        error_text: &'static str,
    ) -> Self {
        let platform = action.platform();
        Self {
            action,
            platform,
            endpoint_path,
            field_specs,
            response_field,
            error_text,
            output_area: platform.output_area(),
        }
    }

    /// The concrete input a field spec reads, on this action's panel
    pub fn input(&self, spec: &FieldSpec) -> InputField {
        InputField::new(self.platform, spec.input)
    }

    /// Payload keys in configured order
    pub fn payload_keys(&self) -> Vec<&'static str> {
        self.field_specs.iter().map(|s| s.key).collect()
    }
}

/// Immutable action table, built once at startup
#[derive(Debug, Clone)]
pub struct ActionTable {
    configs: HashMap<ActionId, ActionConfig>,
}

impl ActionTable {
    /// The generation service's full endpoint set
    pub fn standard() -> Self {
        use ActionId::*;
        use FieldKind::*;

        let topic = FieldSpec::required(Topic, "topic");
        let keywords = FieldSpec::optional(Keywords, "keywords");
        let interests = FieldSpec::required(Topic, "interests");
        let informative = FieldSpec::with_default(Style, "style", "informative");
        let engaging = FieldSpec::with_default(Style, "style", "engaging");
        let professional = FieldSpec::with_default(Style, "style", "professional");

        let entries = vec![
            ActionConfig::new(
                YoutubeGenerateScript,
                "/youtube/generate-script",
                vec![topic, informative],
                "script",
                "Error generating script.",
            ),
            ActionConfig::new(
                YoutubeSuggestChannelName,
                "/youtube/suggest-channel-name",
                vec![topic, keywords],
                "channel_name",
                "Error suggesting channel name.",
            ),
            ActionConfig::new(
                YoutubeSuggestNiche,
                "/youtube/suggest-niche",
                vec![interests],
                "niche_suggestions",
                "Error suggesting a niche.",
            ),
            ActionConfig::new(
                YoutubeGenerateVideoIdeas,
                "/youtube/generate-video-ideas",
                vec![topic, keywords],
                "video_ideas",
                "Error generating video ideas.",
            ),
            ActionConfig::new(
                YoutubeGeneratePostContent,
                "/youtube/generate-post-content",
                vec![topic, keywords, engaging],
                "post_content",
                "Error generating post content.",
            ),
            ActionConfig::new(
                XGenerateTweet,
                "/x/generate-tweet",
                vec![topic, keywords, engaging],
                "tweet",
                "Error generating tweet.",
            ),
            ActionConfig::new(
                InstagramGeneratePost,
                "/instagram/generate-post",
                vec![topic, keywords, engaging],
                "post_content",
                "Error generating Instagram post content.",
            ),
            ActionConfig::new(
                InstagramGenerateStory,
                "/instagram/generate-story",
                vec![topic, keywords, engaging],
                "story_content",
                "Error generating Instagram story content.",
            ),
            ActionConfig::new(
                InstagramSuggestChannelName,
                "/instagram/suggest-channel-name",
                vec![topic, keywords],
                "channel_name",
                "Error suggesting Instagram channel name.",
            ),
            ActionConfig::new(
                InstagramGenerateVideoIdeas,
                "/instagram/generate-video-ideas",
                vec![topic, keywords],
                "video_ideas",
                "Error generating Instagram video ideas.",
            ),
            ActionConfig::new(
                InstagramSuggestNiche,
                "/instagram/suggest-niche",
                vec![interests],
                "niche_suggestions",
                "Error suggesting Instagram niche.",
            ),
            ActionConfig::new(
                InstagramGenerateReelIdeas,
                "/instagram/generate-reel-ideas",
                vec![topic, keywords],
                "reel_ideas",
                "Error generating Instagram reel ideas.",
            ),
            ActionConfig::new(
                InstagramGenerateVideoScript,
                "/instagram/generate-video-script",
                vec![topic, informative],
                "script",
                "Error generating Instagram video script.",
            ),
            ActionConfig::new(
                EmailGenerateEmail,
                "/email/generate-email",
                vec![topic, professional, keywords],
                "email_content",
                "Error generating email.",
            ),
        ];

        Self::from_configs(entries)
    }

    pub fn from_configs(configs: impl IntoIterator<Item = ActionConfig>) -> Self {
        Self {
            configs: configs.into_iter().map(|c| (c.action, c)).collect(),
        }
    }

    pub fn get(&self, action: ActionId) -> Option<&ActionConfig> {
        self.configs.get(&action)
    }

    /// Actions with no config entry
    pub fn missing(&self) -> Vec<ActionId> {
        ActionId::ALL
            .into_iter()
            .filter(|a| !self.configs.contains_key(a))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Configs in panel order
    pub fn iter(&self) -> impl Iterator<Item = &ActionConfig> {
        ActionId::ALL.iter().filter_map(|a| self.configs.get(a))
    }
}
