//! Parser for rating triple files.
//!
//! Each non-empty line holds one observation:
//! `userId::itemId::rating`, optionally followed by extra fields (such as a
//! MovieLens timestamp) which are ignored. Comma and tab separated lines are
//! accepted as well. Lines starting with `#` are comments.

use crate::error::{Result, StoreError};
use crate::types::Observation;
use std::fs;
use std::path::Path;

/// Parse a ratings file into observations, in file order
pub fn parse_ratings(path: &Path) -> Result<Vec<Observation>> {
    if !path.exists() {
        return Err(StoreError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    parse_ratings_str(&content)
}

/// Parse observations from in-memory text
pub fn parse_ratings_str(content: &str) -> Result<Vec<Observation>> {
    let mut observations = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() || line_trimmed.starts_with('#') {
            continue;
        }
        observations.push(parse_line(line_trimmed, line_no)?);
    }

    Ok(observations)
}

fn parse_line(line: &str, line_no: usize) -> Result<Observation> {
    let parts: Vec<&str> = if line.contains("::") {
        line.split("::").collect()
    } else if line.contains('\t') {
        line.split('\t').collect()
    } else {
        line.split(',').collect()
    };

    let field = |idx: usize, name: &str| {
        parts
            .get(idx)
            .copied()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| StoreError::ParseError {
                line: line_no,
                reason: format!("Missing {}", name),
            })
    };

    let user_id = field(0, "userId")?;
    let item_id = field(1, "itemId")?;
    let rating = field(2, "rating")?;

    Ok(Observation {
        user_id: user_id.parse().map_err(|e| StoreError::ParseError {
            line: line_no,
            reason: format!("Invalid userId: {}", e),
        })?,
        item_id: item_id.parse().map_err(|e| StoreError::ParseError {
            line: line_no,
            reason: format!("Invalid itemId: {}", e),
        })?,
        rating: rating.parse().map_err(|e| StoreError::ParseError {
            line: line_no,
            reason: format!("Invalid rating: {}", e),
        })?,
    })
}
