use sentra_types::models::Article;

/// Articles shown on the dashboard. Fixed for the lifetime of the process.
pub fn seed_articles() -> Vec<Article> {
    vec![
        Article {
            id: "a1".into(),
            title: "Pay and View MTNL Landline Bills, Delhi".into(),
            content: "MTNL announces to Delhi circle users...".into(),
        },
        Article {
            id: "a2".into(),
            title: "Search Electronic Indian Postal Order details online".into(),
            content: "Service under the Ministry...".into(),
        },
    ]
}

/// Looks up an article, falling back to the first one for unknown ids.
pub fn find_or_first<'a>(articles: &'a [Article], id: &str) -> Option<&'a Article> {
    articles
        .iter()
        .find(|a| a.id == id)
        .or_else(|| articles.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_falls_back_to_first() {
        let articles = seed_articles();
        assert_eq!(find_or_first(&articles, "a2").unwrap().id, "a2");
        assert_eq!(find_or_first(&articles, "zzz").unwrap().id, "a1");
        assert!(find_or_first(&[], "a1").is_none());
    }
}
