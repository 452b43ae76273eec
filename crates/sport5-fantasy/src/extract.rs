//! Heuristic extraction of typed records from fantasy-site HTML.
//!
//! The site's markup is not a contract: class names and nesting drift
//! between releases. Field lookup is a fuzzy structural search — an
//! element matches a field when its tag is in a small allowed set AND its
//! class attribute contains one of the field's class substrings,
//! case-insensitively. First match wins; a missing field is `None`, never
//! an error.

use scraper::{ElementRef, Html, Selector};

use crate::types::{LeagueRow, LeagueTable, LoginMethod, Player, TeamRecord};

/// Where a semantic field may live: allowed tag names × class substrings.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub tags: &'static [&'static str],
    pub class_hints: &'static [&'static str],
}

pub const TEAM_NAME: FieldRule = FieldRule {
    tags: &["h1", "h2"],
    class_hints: &["team"],
};

pub const PLAYER_ROW: FieldRule = FieldRule {
    tags: &["div", "tr"],
    class_hints: &["player"],
};

pub const PLAYER_NAME: FieldRule = FieldRule {
    tags: &["span", "td"],
    class_hints: &["name"],
};

pub const PLAYER_PRICE: FieldRule = FieldRule {
    tags: &["span", "td"],
    class_hints: &["price", "cost"],
};

pub const BUDGET: FieldRule = FieldRule {
    tags: &["span", "div"],
    class_hints: &["budget"],
};

pub const POINTS: FieldRule = FieldRule {
    tags: &["span", "div"],
    class_hints: &["point"],
};

pub const LEAGUE_TABLE: FieldRule = FieldRule {
    tags: &["table"],
    class_hints: &["league"],
};

impl FieldRule {
    /// Whether a single element satisfies this rule.
    pub fn matches(&self, el: ElementRef<'_>) -> bool {
        if !self.tags.contains(&el.value().name()) {
            return false;
        }
        let Some(class) = el.value().attr("class") else {
            return false;
        };
        let class = class.to_lowercase();
        self.class_hints.iter().any(|hint| class.contains(hint))
    }

    /// First matching element under `scope`, excluding `scope` itself.
    pub fn find<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        elements_under(scope).find(|el| self.matches(*el))
    }

    /// All matching elements under `scope`, in document order.
    pub fn find_all<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        elements_under(scope).filter(|el| self.matches(*el)).collect()
    }

    /// Trimmed text of the first match, if any.
    pub fn first_text(&self, scope: ElementRef<'_>) -> Option<String> {
        self.find(scope).map(element_text)
    }
}

/// Descendant elements of `scope`, excluding `scope` itself.
fn elements_under<'a>(scope: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    scope.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// Concatenated text content, trimmed of surrounding whitespace.
fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Extract the caller's team from the `/my-team` page markup.
///
/// A player entry is emitted for every container with a nested name match;
/// the price is optional.
pub fn team(html: &str, login_method: LoginMethod) -> TeamRecord {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let mut players = Vec::new();
    for row in PLAYER_ROW.find_all(root) {
        let Some(name) = PLAYER_NAME.first_text(row) else {
            continue;
        };
        players.push(Player {
            name,
            price: PLAYER_PRICE.first_text(row),
        });
    }

    TeamRecord {
        team_name: TEAM_NAME.first_text(root),
        budget: BUDGET.first_text(root),
        points: POINTS.first_text(root),
        players,
        login_method,
    }
}

/// Extract the standings from the `/league` page markup.
///
/// The first row of the matching table is always treated as a header and
/// skipped; rows with fewer than three cells are silently dropped.
pub fn league(html: &str, login_method: LoginMethod) -> LeagueTable {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let row_sel = Selector::parse("tr").unwrap();
    let cell_sel = Selector::parse("td, th").unwrap();

    let mut teams = Vec::new();
    if let Some(table) = LEAGUE_TABLE.find(root) {
        for row in table.select(&row_sel).skip(1) {
            let cells: Vec<String> = row.select(&cell_sel).map(element_text).collect();
            if let [position, team_name, points, ..] = cells.as_slice() {
                teams.push(LeagueRow {
                    position: position.clone(),
                    team_name: team_name.clone(),
                    points: Some(points.clone()),
                });
            }
        }
    }

    LeagueTable {
        teams,
        login_method,
    }
}

/// CSRF token the login form echoes back, when the page carries one.
pub fn csrf_token(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let sel = Selector::parse(r#"input[name="_token"]"#).unwrap();
    doc.select(&sel)
        .next()
        .and_then(|el| el.value().attr("value"))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_player_without_price() {
        let html = r#"<div class="player-row"><span class="player-name">Ron</span></div>"#;
        let record = team(html, LoginMethod::Credentials);
        assert_eq!(
            record.players,
            vec![Player {
                name: "Ron".to_string(),
                price: None,
            }]
        );
    }

    #[test]
    fn test_full_team_page() {
        let html = r#"
        <html><body>
            <h1 class="team-title">  The Mighty Ducks  </h1>
            <div class="budget-left">12.5M</div>
            <span class="total-points">87</span>
            <table>
                <tr class="player">
                    <td class="name">Ron</td>
                    <td class="price">4.2M</td>
                </tr>
                <tr class="player">
                    <td class="name">Dana</td>
                    <td class="cost">3.1M</td>
                </tr>
            </table>
        </body></html>
        "#;

        let record = team(html, LoginMethod::Google);
        assert_eq!(record.team_name.as_deref(), Some("The Mighty Ducks"));
        assert_eq!(record.budget.as_deref(), Some("12.5M"));
        assert_eq!(record.points.as_deref(), Some("87"));
        assert_eq!(record.login_method, LoginMethod::Google);
        assert_eq!(
            record.players,
            vec![
                Player {
                    name: "Ron".to_string(),
                    price: Some("4.2M".to_string()),
                },
                Player {
                    name: "Dana".to_string(),
                    price: Some("3.1M".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_missing_fields_are_none() {
        let record = team("<html><body><p>maintenance</p></body></html>", LoginMethod::Credentials);
        assert_eq!(record.team_name, None);
        assert_eq!(record.budget, None);
        assert_eq!(record.points, None);
        assert!(record.players.is_empty());
    }

    #[test]
    fn test_class_match_is_case_insensitive() {
        let html = r#"<h2 class="Team-Header">Hapoel</h2>"#;
        let record = team(html, LoginMethod::Credentials);
        assert_eq!(record.team_name.as_deref(), Some("Hapoel"));
    }

    #[test]
    fn test_wrong_tag_does_not_match() {
        // "team" class on a <p> is outside the allowed tag set.
        let html = r#"<p class="team-title">Not a heading</p>"#;
        let record = team(html, LoginMethod::Credentials);
        assert_eq!(record.team_name, None);
    }

    #[test]
    fn test_player_without_name_is_skipped() {
        let html = r#"
            <div class="player"><span class="price">9.9M</span></div>
            <div class="player"><span class="name">Omer</span></div>
        "#;
        let record = team(html, LoginMethod::Credentials);
        assert_eq!(record.players.len(), 1);
        assert_eq!(record.players[0].name, "Omer");
    }

    #[test]
    fn test_league_header_skipped_and_short_rows_dropped() {
        let html = r#"
        <table class="league-standings">
            <tr><th>Pos</th><th>Team</th><th>Pts</th></tr>
            <tr><td>1</td><td>Alpha</td><td>30</td></tr>
            <tr><td>2</td><td>Beta</td></tr>
            <tr><td>3</td><td>Gamma</td><td>21</td></tr>
            <tr><td>4</td><td>Delta</td><td>18</td></tr>
        </table>
        "#;

        let table = league(html, LoginMethod::Credentials);
        assert_eq!(table.teams.len(), 3);
        assert_eq!(
            table.teams[0],
            LeagueRow {
                position: "1".to_string(),
                team_name: "Alpha".to_string(),
                points: Some("30".to_string()),
            }
        );
        assert_eq!(table.teams[2].team_name, "Delta");
    }

    #[test]
    fn test_league_first_row_skipped_even_when_it_looks_like_data() {
        let html = r#"
        <table class="league">
            <tr><td>1</td><td>Alpha</td><td>30</td></tr>
            <tr><td>2</td><td>Beta</td><td>27</td></tr>
        </table>
        "#;

        let table = league(html, LoginMethod::Credentials);
        assert_eq!(table.teams.len(), 1);
        assert_eq!(table.teams[0].team_name, "Beta");
    }

    #[test]
    fn test_league_without_matching_table_is_empty() {
        let html = r#"<table class="fixtures"><tr><td>a</td><td>b</td><td>c</td></tr></table>"#;
        let table = league(html, LoginMethod::Credentials);
        assert!(table.teams.is_empty());
    }

    #[test]
    fn test_league_cells_are_trimmed() {
        let html = r#"
        <table class="league">
            <tr><th>h</th><th>h</th><th>h</th></tr>
            <tr><td> 1 </td><td>
                Maccabi
            </td><td> 44 </td></tr>
        </table>
        "#;

        let table = league(html, LoginMethod::Credentials);
        assert_eq!(table.teams[0].position, "1");
        assert_eq!(table.teams[0].team_name, "Maccabi");
        assert_eq!(table.teams[0].points.as_deref(), Some("44"));
    }

    #[test]
    fn test_csrf_token_found() {
        let html = r#"
        <form method="post" action="/login">
            <input type="hidden" name="_token" value="abc123">
            <input type="email" name="email">
        </form>
        "#;
        assert_eq!(csrf_token(html).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_csrf_token_absent() {
        assert_eq!(csrf_token("<form><input name=\"email\"></form>"), None);
    }
}
