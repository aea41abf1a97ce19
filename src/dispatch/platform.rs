//! Platforms and the input fields each platform panel carries

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Target channel a group of actions belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Video,
    Microblog,
    Photo,
    Email,
}

impl Platform {
    /// All platforms in tab order
    pub const ALL: [Platform; 4] = [
        Platform::Video,
        Platform::Microblog,
        Platform::Photo,
        Platform::Email,
    ];

    /// Prefix used for the platform's field and output ids
    pub fn prefix(&self) -> &'static str {
        match self {
            Platform::Video => "youtube",
            Platform::Microblog => "x",
            Platform::Photo => "instagram",
            Platform::Email => "email",
        }
    }

    /// Label shown in the tab bar
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Video => "YouTube",
            Platform::Microblog => "X",
            Platform::Photo => "Instagram",
            Platform::Email => "Email",
        }
    }

    /// Id of the platform's output area, e.g. `youtubeOutput`
    pub fn output_area(&self) -> String {
        format!("{}Output", self.prefix())
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Video => "video",
            Platform::Microblog => "microblog",
            Platform::Photo => "photo",
            Platform::Email => "email",
        };
        f.write_str(name)
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "video" | "youtube" => Ok(Platform::Video),
            "microblog" | "x" | "twitter" => Ok(Platform::Microblog),
            "photo" | "instagram" => Ok(Platform::Photo),
            "email" => Ok(Platform::Email),
            other => Err(format!("unknown platform: {}", other)),
        }
    }
}

/// Kind of on-screen input; every platform panel has one of each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Topic,
    Keywords,
    Style,
}

impl FieldKind {
    pub const ALL: [FieldKind; 3] = [FieldKind::Topic, FieldKind::Keywords, FieldKind::Style];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Topic => "Topic",
            FieldKind::Keywords => "Keywords",
            FieldKind::Style => "Style",
        }
    }
}

/// A specific input on a specific platform panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputField {
    pub platform: Platform,
    pub kind: FieldKind,
}

impl InputField {
    pub const fn new(platform: Platform, kind: FieldKind) -> Self {
        Self { platform, kind }
    }

    /// Element id, e.g. `instagramKeywords`
    pub fn id(&self) -> String {
        format!("{}{}", self.platform.prefix(), self.kind.label())
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_ids_follow_platform_prefix() {
        assert_eq!(InputField::new(Platform::Video, FieldKind::Topic).id(), "youtubeTopic");
        assert_eq!(InputField::new(Platform::Microblog, FieldKind::Keywords).id(), "xKeywords");
        assert_eq!(InputField::new(Platform::Photo, FieldKind::Style).id(), "instagramStyle");
        assert_eq!(Platform::Email.output_area(), "emailOutput");
    }

    #[test]
    fn test_platform_parse_accepts_aliases() {
        assert_eq!("youtube".parse::<Platform>().unwrap(), Platform::Video);
        assert_eq!("X".parse::<Platform>().unwrap(), Platform::Microblog);
        assert_eq!("photo".parse::<Platform>().unwrap(), Platform::Photo);
        assert!("fax".parse::<Platform>().is_err());
    }

    #[test]
    fn test_platform_index_matches_tab_order() {
        for (i, p) in Platform::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
        }
    }
}
