//! KPI Cards
//!
//! Static card descriptors per dashboard, resolved against the counts
//! object that comes back with a list response.

use crate::models::Counts;

/// Card accent colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Blue,
    Green,
    Amber,
    Red,
    Purple,
    Slate,
}

impl Tone {
    pub fn css_class(&self) -> &'static str {
        match self {
            Tone::Blue => "kpi-blue",
            Tone::Green => "kpi-green",
            Tone::Amber => "kpi-amber",
            Tone::Red => "kpi-red",
            Tone::Purple => "kpi-purple",
            Tone::Slate => "kpi-slate",
        }
    }
}

/// One metric tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KpiCard {
    pub title: &'static str,
    /// Key looked up in [`Counts`]
    pub value_key: &'static str,
    pub icon: &'static str,
    pub tone: Tone,
    /// Makes the whole card a link
    pub link: Option<&'static str>,
}

const fn card(
    title: &'static str,
    value_key: &'static str,
    icon: &'static str,
    tone: Tone,
    link: Option<&'static str>,
) -> KpiCard {
    KpiCard { title, value_key, icon, tone, link }
}

pub const ADMIN_LEAD_CARDS: &[KpiCard] = &[
    card("Total Leads", "total_leads", "📋", Tone::Blue, Some("/admin/leads/all")),
    card("Interested", "total_interested_leads", "👍", Tone::Green, Some("/admin/leads/interested")),
    card("Visits", "total_visits_leads", "🏠", Tone::Purple, Some("/admin/leads/visit")),
    card("Not Interested", "total_not_interested_leads", "👎", Tone::Red, Some("/admin/leads/not_interested")),
    card("Not Picked", "total_not_picked_leads", "📵", Tone::Amber, Some("/admin/leads/not_picked")),
    card("Other Location", "total_other_location_leads", "📍", Tone::Slate, Some("/admin/leads/other_location")),
    card("Lost", "total_lost_leads", "❌", Tone::Red, Some("/admin/leads/lost")),
];

pub const PRODUCTIVITY_CARDS: &[KpiCard] = &[
    card("Total Leads", "total_leads", "📋", Tone::Blue, None),
    card("Interested", "interested", "👍", Tone::Green, None),
    card("Visits", "visit", "🏠", Tone::Purple, None),
    card("Not Interested", "not_interested", "👎", Tone::Red, None),
    card("Lost", "lost", "❌", Tone::Slate, None),
];

pub const SUPERADMIN_CARDS: &[KpiCard] = &[
    card("Admins", "total_admins", "🛡", Tone::Purple, Some("/superadmin/admins")),
    card("Team Leaders", "total_team_leaders", "🧭", Tone::Blue, None),
    card("Staff", "total_staff", "👥", Tone::Green, None),
    card("Total Leads", "total_leads", "📋", Tone::Amber, None),
    card("Visits", "total_visits_leads", "🏠", Tone::Slate, None),
];

pub const TEAM_LEADER_CARDS: &[KpiCard] = &[
    card("Total Leads", "total_leads", "📋", Tone::Blue, Some("/team-leader/leads/all")),
    card("Today's Follow-ups", "today_follow", "⏰", Tone::Amber, Some("/team-leader/leads/today_follow")),
    card("Interested", "interested", "👍", Tone::Green, Some("/team-leader/leads/interested")),
    card("Visits", "visit", "🏠", Tone::Purple, Some("/team-leader/leads/visit")),
    card("Lost", "lost", "❌", Tone::Red, Some("/team-leader/leads/lost")),
];

pub const STAFF_CARDS: &[KpiCard] = &[
    card("My Leads", "total_leads", "📋", Tone::Blue, Some("/staff/leads")),
    card("Follow-ups Today", "today_follow", "⏰", Tone::Amber, None),
    card("Interested", "interested", "👍", Tone::Green, None),
    card("Visits", "visit", "🏠", Tone::Purple, None),
];

/// Pair every card with its value, in descriptor order. Missing keys are 0.
pub fn resolve<'a>(cards: &'a [KpiCard], counts: &Counts) -> Vec<(&'a KpiCard, i64)> {
    cards.iter().map(|c| (c, counts.get(c.value_key))).collect()
}

/// `round(part / total * 100)`, 0 when there is nothing to divide by
pub fn percentage(part: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_keeps_order_and_defaults_missing() {
        let counts: Counts = [("total_leads", 40), ("total_visits_leads", 6)].into_iter().collect();
        let resolved = resolve(ADMIN_LEAD_CARDS, &counts);
        assert_eq!(resolved.len(), ADMIN_LEAD_CARDS.len());
        assert_eq!(resolved[0].0.title, "Total Leads");
        assert_eq!(resolved[0].1, 40);
        assert_eq!(resolved[1].1, 0);
        assert_eq!(resolved[2].1, 6);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(5, 10), 50);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(4, 0), 0);
    }

    #[test]
    fn test_links_are_optional() {
        assert!(PRODUCTIVITY_CARDS.iter().all(|c| c.link.is_none()));
        assert_eq!(ADMIN_LEAD_CARDS[2].link, Some("/admin/leads/visit"));
    }
}
