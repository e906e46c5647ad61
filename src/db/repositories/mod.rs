use sea_orm::sea_query::LikeExpr;

pub mod annotation;
pub mod dataset;
pub mod image_metadata;
pub mod search;

const LIKE_ESCAPE: char = '\\';

/// `LIKE '%term%'` where `\`, `%` and `_` in `term` match literally.
pub(crate) fn contains_literal(term: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, LIKE_ESCAPE | '%' | '_') {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');

    LikeExpr::new(pattern).escape(LIKE_ESCAPE)
}
