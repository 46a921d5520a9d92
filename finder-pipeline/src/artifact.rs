use crate::record::QuestionRecord;
use std::io;
use std::path::Path;

/// Dump a batch as pretty-printed JSON, replacing any previous file.
pub async fn write_batch(path: &Path, records: &[QuestionRecord]) -> io::Result<()> {
    let mut body = serde_json::to_vec_pretty(records).map_err(io::Error::other)?;
    body.push(b'\n');
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, body).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_parseable_json_into_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("related_questions.json");
        let records = vec![QuestionRecord {
            url: "https://leetcode.com/problems/two-sum/".into(),
            platform: "LeetCode".into(),
            topic: "Two Sum".into(),
            difficulty_level: "Easy".into(),
            company: "General".into(),
            category: "Arrays".into(),
        }];

        write_batch(&path, &records).await.unwrap();

        let back: Vec<QuestionRecord> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, records);
    }
}
