use auction_client::{CardImage, ListingCard, Notice, NoticeLevel};
use colored::{ColoredString, Colorize};

pub fn print_cards(cards: &[ListingCard]) {
    for card in cards {
        println!("{}", card_text(card));
        println!();
    }
}

pub fn card_text(card: &ListingCard) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "[{}] {}  {}",
        card.id,
        card.title.bold(),
        badge(card)
    ));
    lines.push(format!("    {}", truncate(&card.description, 70)));
    lines.push(format!(
        "    {}   Ends: {}",
        card.price.green().bold(),
        card.ends
    ));

    let mut meta = Vec::new();
    if let Some(seller) = &card.seller {
        meta.push(format!("by {}", seller));
    }
    if card.bid_count > 0 {
        meta.push(format!("{} bids", card.bid_count));
    }
    if let CardImage::Url { src, .. } = &card.image {
        meta.push(format!("image: {}", src));
    }
    if !meta.is_empty() {
        lines.push(format!("    {}", meta.join(" · ").dimmed()));
    }

    let actions: Vec<String> = card
        .actions
        .iter()
        .map(|a| format!("[{}]", a.label()))
        .collect();
    lines.push(format!("    {}", actions.join(" ")));

    lines.join("\n")
}

fn badge(card: &ListingCard) -> ColoredString {
    let label = format!("({})", card.badge.label);
    match card.badge.class.as_str() {
        "status-active" => label.green(),
        "status-ended" => label.yellow(),
        "status-cancelled" => label.red(),
        _ => label.normal(),
    }
}

pub fn print_notice(notice: &Notice) {
    let text = notice.to_string();
    match notice.level {
        NoticeLevel::Success => println!("✅ {}", text.green()),
        NoticeLevel::Info => println!("ℹ️  {}", text.cyan()),
        NoticeLevel::Error => eprintln!("❌ {}", text.red()),
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auction_client::{CardAction, StatusBadge};

    fn card() -> ListingCard {
        ListingCard {
            id: 4,
            title: "Clock".into(),
            description: "No description available".into(),
            price: "$12.00".into(),
            badge: StatusBadge {
                label: "Active".into(),
                class: "status-active".into(),
            },
            ends: "Mar 5, 2025".into(),
            image: CardImage::Placeholder,
            seller: Some("bob".into()),
            bid_count: 2,
            actions: vec![CardAction::ViewDetails(4), CardAction::PlaceBid(4)],
        }
    }

    #[test]
    fn card_text_lists_price_date_and_actions() {
        colored::control::set_override(false);
        let text = card_text(&card());

        assert!(text.contains("[4] Clock  (Active)"));
        assert!(text.contains("$12.00   Ends: Mar 5, 2025"));
        assert!(text.contains("by bob · 2 bids"));
        assert!(text.contains("[View Details] [Place Bid]"));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("ёжик", 2), "ёж...");
        assert_eq!(truncate("short", 10), "short");
    }
}
