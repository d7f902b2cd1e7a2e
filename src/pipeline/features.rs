//! Derived features: Title, FamilySize and IsAlone

use std::sync::LazyLock;

use polars::prelude::*;
use regex::Regex;

use super::error::{PrepError, PrepResult};
use super::schema::{
    required_int_values, text_values, with_column, FAMILY_SIZE, IS_ALONE, NAME, PARCH, SIBSP,
    TITLE,
};

/// Letters preceded by a space and followed by a period, e.g. " Mr." in "Braund, Mr. Owen"
static TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ([A-Za-z]+)\.").expect("title pattern is a valid regex"));

/// Extract the honorific from a passenger name.
///
/// Returns the first match only; `None` when the name carries no title.
pub fn extract_title(name: &str) -> Option<String> {
    TITLE_PATTERN
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Stage 4: add a Title column derived from Name
pub fn add_title(df: &DataFrame) -> PrepResult<DataFrame> {
    let titles: Vec<Option<String>> = text_values(df, NAME)?
        .into_iter()
        .map(|name| name.as_deref().and_then(extract_title))
        .collect();
    with_column(df, Column::new(TITLE.into(), titles))
}

/// Stage 5: FamilySize = SibSp + Parch + 1 (the passenger themself)
pub fn add_family_size(df: &DataFrame) -> PrepResult<DataFrame> {
    let sibsp = required_int_values(df, SIBSP)?;
    let parch = required_int_values(df, PARCH)?;
    let sizes: Vec<i64> = sibsp
        .iter()
        .zip(parch.iter())
        .enumerate()
        .map(|(row, (s, p))| {
            s.checked_add(*p)
                .and_then(|n| n.checked_add(1))
                .ok_or_else(|| {
                    PrepError::schema(format!(
                        "{} + {} + 1 overflows at row {} ({} + {})",
                        SIBSP, PARCH, row, s, p
                    ))
                })
        })
        .collect::<PrepResult<_>>()?;
    with_column(df, Column::new(FAMILY_SIZE.into(), sizes))
}

/// Stage 6: IsAlone is true iff FamilySize == 1
pub fn add_is_alone(df: &DataFrame) -> PrepResult<DataFrame> {
    let alone: Vec<bool> = required_int_values(df, FAMILY_SIZE)?
        .into_iter()
        .map(|size| size == 1)
        .collect();
    with_column(df, Column::new(IS_ALONE.into(), alone))
}
