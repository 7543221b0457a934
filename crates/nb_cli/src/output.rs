use chrono::Local;
use nb_core::{ArticleId, InteractionState};
use nb_feed::{ArticleCard, BrowseResult};
use nb_storage::ListCounts;
use std::fmt::Write;

pub fn format_counts(counts: &ListCounts) -> String {
    format!(
        "👍 Liked ({})  👎 Disliked ({})  ⭐ Favorites ({})",
        counts.liked, counts.disliked, counts.favorites
    )
}

pub fn format_state(id: &ArticleId, state: &InteractionState) -> String {
    let mark = |on: bool| if on { "x" } else { " " };
    format!(
        "{id}  [{}] 👍 {}  [{}] 👎 {}  [{}] ⭐",
        mark(state.user_liked),
        state.likes,
        mark(state.user_disliked),
        state.dislikes,
        mark(state.user_favorited),
    )
}

fn format_card(out: &mut String, number: usize, card: &ArticleCard) {
    let article = &card.article;
    let source = match article.source_name() {
        "" => "Unknown Source",
        name => name,
    };
    let published = article
        .published()
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();

    let _ = writeln!(out, "{number}. {}", article.title);
    let _ = writeln!(out, "   {source} • {published}");
    if let Some(description) = article.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "   {description}");
    }
    if let Some(url) = &article.url {
        let _ = writeln!(out, "   {url}");
    }
    let _ = writeln!(out, "   {}", format_state(&card.id, &card.state));
}

pub fn format_browse(result: &BrowseResult) -> String {
    let mut out = String::new();
    let page = &result.page;
    if page.items.is_empty() {
        out.push_str("No news articles found.\n");
    } else {
        for (i, card) in page.items.iter().enumerate() {
            format_card(&mut out, page.start + i + 1, card);
        }
        if page.total_pages > 1 {
            let _ = writeln!(
                out,
                "{} (page {}/{})",
                page.summary(),
                page.page,
                page.total_pages
            );
        }
    }
    let _ = writeln!(out, "{}", format_counts(&result.counts));
    out
}
