use outage_schedule_utils::regex;
use scraper::{ElementRef, Html};

/// Finds the "updated at" display string (`DD.MM.YYYY HH:MM`) next to `marker`.
///
/// The first text node containing `marker` is located, and the timestamp is searched for
/// in the whole text of its parent element.
pub fn parse(html: &Html, marker: &str) -> Option<String> {
    html.root_element()
        .descendants()
        .filter(|node| node.value().as_text().is_some_and(|t| t.contains(marker)))
        .find_map(|node| {
            let parent = node.parent().and_then(ElementRef::wrap)?;
            let text = parent.text().collect::<String>();
            regex!(r"([0-9]{2}\.[0-9]{2}\.[0-9]{4}\s+[0-9]{2}:[0-9]{2})")
                .captures(&text)
                .map(|captures| captures[1].to_owned())
        })
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::parse;

    #[test]
    fn finds_update_time() {
        let html = Html::parse_document(
            "<div><p>Графік</p><p><b>Оновлено:</b> 02.11.2025 21:15</p></div>",
        );
        // The marker sits in <b>, whose own text has no timestamp
        assert_eq!(parse(&html, "Оновлено:"), None);

        let html =
            Html::parse_document("<div><p>Графік</p><p>Оновлено: <i>02.11.2025 21:15</i></p></div>");
        assert_eq!(parse(&html, "Оновлено:").as_deref(), Some("02.11.2025 21:15"));
    }

    #[test]
    fn missing_marker() {
        let html = Html::parse_document("<p>02.11.2025 21:15</p>");
        assert_eq!(parse(&html, "Оновлено:"), None);
    }
}
