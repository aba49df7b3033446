//! Entities read from the forum host.

use serde::{Deserialize, Serialize};

use crate::{PostId, TopicId};

/// The post fields the bridge needs: `pid` and `content`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostFields {
    /// Post id; `0` when the host had no id for the post.
    #[serde(default)]
    pub pid: PostId,
    /// Post content.
    #[serde(default)]
    pub content: String,
}

impl PostFields {
    pub fn new(pid: PostId, content: impl Into<String>) -> Self {
        Self {
            pid,
            content: content.into(),
        }
    }
}

/// The topic fields the bridge needs: `tid`, `mainPid` and `title`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicFields {
    /// Topic id.
    pub tid: TopicId,
    /// The topic's first post, which carries the title in the index.
    #[serde(default)]
    pub main_pid: Option<PostId>,
    /// Topic title.
    #[serde(default)]
    pub title: String,
}

impl TopicFields {
    pub fn new(tid: TopicId, main_pid: Option<PostId>, title: impl Into<String>) -> Self {
        Self {
            tid,
            main_pid,
            title: title.into(),
        }
    }

    /// The main post id, treating `0` as absent.
    pub fn main_pid(&self) -> Option<PostId> {
        self.main_pid.filter(|pid| *pid != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_deserializes_host_field_names() {
        let topic: TopicFields =
            serde_json::from_str(r#"{"tid": 3, "mainPid": 11, "title": "Welcome"}"#).unwrap();

        assert_eq!(topic, TopicFields::new(3, Some(11), "Welcome"));
    }

    #[test]
    fn test_zero_main_pid_is_absent() {
        let topic = TopicFields::new(3, Some(0), "Welcome");
        assert_eq!(topic.main_pid(), None);
    }
}
