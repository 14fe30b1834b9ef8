// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::entity::Document;
use crate::error::Result;

/// File content for a document: the fetched object as indented JSON, fields
/// in the order the server sent them, no trailing newline.
pub fn render(document: &Document) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(&document.body)?)
}

/// The `[offset, offset + size)` window of `content`, clipped to its end
pub fn slice(content: &[u8], offset: u64, size: u64) -> &[u8] {
    let len = content.len() as u64;
    let start = offset.min(len);
    let end = offset.saturating_add(size).min(len);
    &content[start as usize..end as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use serde_json::json;

    fn document(value: serde_json::Value) -> Document {
        match Entity::classify(value) {
            Entity::Document(doc) => doc,
            other => panic!("not a document: {other:?}"),
        }
    }

    #[test]
    fn test_render_keeps_field_order() {
        let doc = document(json!({"_id": "doc1", "_rev": "1-abc", "zeta": 1, "alpha": [1, 2]}));
        let text = String::from_utf8(render(&doc).unwrap()).unwrap();
        assert_eq!(
            text,
            "{\n  \"_id\": \"doc1\",\n  \"_rev\": \"1-abc\",\n  \"zeta\": 1,\n  \"alpha\": [\n    1,\n    2\n  ]\n}"
        );
    }

    #[test]
    fn test_render_from_body_order() {
        let entity = Entity::from_body(r#"{"_rev":"2-b","z":null,"_id":"d"}"#);
        let Entity::Document(doc) = entity else {
            panic!("expected a document");
        };
        let text = String::from_utf8(render(&doc).unwrap()).unwrap();
        assert_eq!(text, "{\n  \"_rev\": \"2-b\",\n  \"z\": null,\n  \"_id\": \"d\"\n}");
    }

    #[test]
    fn test_render_keeps_numbers_exact() {
        let entity = Entity::from_body(
            r#"{"_id":"n","_rev":"1-n","big":12345678901234567890123,"neg":-98765432109876543210,"pi":3.14159265358979323846264338}"#,
        );
        let Entity::Document(doc) = entity else {
            panic!("expected a document");
        };
        let text = String::from_utf8(render(&doc).unwrap()).unwrap();
        assert!(text.contains("\"big\": 12345678901234567890123"), "{text}");
        assert!(text.contains("\"neg\": -98765432109876543210"), "{text}");
        assert!(text.contains("\"pi\": 3.14159265358979323846264338"), "{text}");
    }

    #[test]
    fn test_slice() {
        let content = b"0123456789";
        assert_eq!(slice(content, 0, 1000), content);
        assert_eq!(slice(content, 2, 3), b"234");
        assert_eq!(slice(content, 8, 5), b"89");
        assert_eq!(slice(content, 10, 5), b"");
        assert_eq!(slice(content, 42, 5), b"");
        assert_eq!(slice(content, 3, 0), b"");
        assert_eq!(slice(content, 5, u64::MAX), b"56789");
    }
}
