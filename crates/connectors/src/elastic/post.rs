use serde::{Deserialize, Serialize};

/// A post document as stored in the search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author: String,
    pub message: String,
    pub department: String,
    pub email: String,
    pub clearance: i64,
    #[serde(default)]
    pub likes: Vec<String>,
}

/// Index settings and mappings for the posts index.
pub const POSTS_INDEX_MAPPING: &str = r#"{
    "settings": {
        "number_of_shards": 1,
        "number_of_replicas": 0
    },
    "mappings": {
        "properties": {
            "id": { "type": "keyword" },
            "author": { "type": "keyword" },
            "message": {
                "type": "text",
                "fields": { "raw": { "type": "keyword" } }
            },
            "department": { "type": "keyword" },
            "email": { "type": "keyword" },
            "clearance": { "type": "integer" },
            "likes": { "type": "keyword" }
        }
    }
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_is_valid_json() {
        let mapping: serde_json::Value = serde_json::from_str(POSTS_INDEX_MAPPING).unwrap();
        assert_eq!(
            mapping["mappings"]["properties"]["clearance"]["type"],
            "integer"
        );
    }

    #[test]
    fn test_likes_default_to_empty() {
        let post: Post = serde_json::from_str(
            r#"{"id": "post3", "author": "charlie", "message": "Hello world",
                "department": "it", "email": "charlie@xyz.com", "clearance": 1}"#,
        )
        .unwrap();
        assert!(post.likes.is_empty());
    }
}
