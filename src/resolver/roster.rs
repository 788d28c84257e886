//! Static in-memory roster of well-known clubs.
//!
//! First layer of team resolution: exact, alias, and substring matching
//! against a curated list, so the common cases never touch the network.

use crate::types::{ResolutionSource, TeamIdentity};

/// One known club with its accepted aliases.
struct RosterEntry {
    canonical: &'static str,
    country: &'static str,
    league: &'static str,
    aliases: &'static [&'static str],
}

/// Substring matching only kicks in at this normalized input length,
/// to avoid over-matching on short strings.
const MIN_SUBSTRING_LEN: usize = 3;

static ROSTER: &[RosterEntry] = &[
    RosterEntry {
        canonical: "Paris Saint-Germain",
        country: "France",
        league: "Ligue 1",
        aliases: &["psg", "paris sg", "paris"],
    },
    RosterEntry {
        canonical: "Olympique de Marseille",
        country: "France",
        league: "Ligue 1",
        aliases: &["om", "marseille"],
    },
    RosterEntry {
        canonical: "Olympique Lyonnais",
        country: "France",
        league: "Ligue 1",
        aliases: &["ol", "lyon"],
    },
    RosterEntry {
        canonical: "AS Monaco",
        country: "France",
        league: "Ligue 1",
        aliases: &["monaco"],
    },
    RosterEntry {
        canonical: "LOSC Lille",
        country: "France",
        league: "Ligue 1",
        aliases: &["lille", "losc"],
    },
    RosterEntry {
        canonical: "Real Madrid",
        country: "Spain",
        league: "La Liga",
        aliases: &["madrid"],
    },
    RosterEntry {
        canonical: "FC Barcelona",
        country: "Spain",
        league: "La Liga",
        aliases: &["barcelona", "barca", "barça"],
    },
    RosterEntry {
        canonical: "Atlético de Madrid",
        country: "Spain",
        league: "La Liga",
        aliases: &["atletico", "atletico madrid", "atleti"],
    },
    RosterEntry {
        canonical: "Bayern Munich",
        country: "Germany",
        league: "Bundesliga",
        aliases: &["bayern", "fc bayern"],
    },
    RosterEntry {
        canonical: "Borussia Dortmund",
        country: "Germany",
        league: "Bundesliga",
        aliases: &["dortmund", "bvb"],
    },
    RosterEntry {
        canonical: "RB Leipzig",
        country: "Germany",
        league: "Bundesliga",
        aliases: &["leipzig"],
    },
    RosterEntry {
        canonical: "Bayer Leverkusen",
        country: "Germany",
        league: "Bundesliga",
        aliases: &["leverkusen"],
    },
    RosterEntry {
        canonical: "Manchester City",
        country: "England",
        league: "Premier League",
        aliases: &["man city", "city"],
    },
    RosterEntry {
        canonical: "Manchester United",
        country: "England",
        league: "Premier League",
        aliases: &["man united", "man utd", "united"],
    },
    RosterEntry {
        canonical: "Liverpool FC",
        country: "England",
        league: "Premier League",
        aliases: &["liverpool"],
    },
    RosterEntry {
        canonical: "Arsenal FC",
        country: "England",
        league: "Premier League",
        aliases: &["arsenal", "gunners"],
    },
    RosterEntry {
        canonical: "Chelsea FC",
        country: "England",
        league: "Premier League",
        aliases: &["chelsea"],
    },
    RosterEntry {
        canonical: "Tottenham Hotspur",
        country: "England",
        league: "Premier League",
        aliases: &["tottenham", "spurs"],
    },
    RosterEntry {
        canonical: "Juventus",
        country: "Italy",
        league: "Serie A",
        aliases: &["juve"],
    },
    RosterEntry {
        canonical: "Inter Milan",
        country: "Italy",
        league: "Serie A",
        aliases: &["inter"],
    },
    RosterEntry {
        canonical: "AC Milan",
        country: "Italy",
        league: "Serie A",
        aliases: &["milan"],
    },
    RosterEntry {
        canonical: "SSC Napoli",
        country: "Italy",
        league: "Serie A",
        aliases: &["napoli", "naples"],
    },
    RosterEntry {
        canonical: "AFC Ajax",
        country: "Netherlands",
        league: "Eredivisie",
        aliases: &["ajax"],
    },
    RosterEntry {
        canonical: "FC Porto",
        country: "Portugal",
        league: "Primeira Liga",
        aliases: &["porto"],
    },
    RosterEntry {
        canonical: "SL Benfica",
        country: "Portugal",
        league: "Primeira Liga",
        aliases: &["benfica"],
    },
];

impl RosterEntry {
    fn to_identity(&self, raw_input: &str) -> TeamIdentity {
        TeamIdentity {
            raw_input: raw_input.to_string(),
            canonical_name: self.canonical.to_string(),
            country: self.country.to_string(),
            league: Some(self.league.to_string()),
            source: ResolutionSource::Local,
        }
    }
}

/// Look up a team in the static roster.
///
/// Match order: exact canonical name, exact alias, then substring of the
/// canonical name (input length permitting). All case-insensitive.
pub fn lookup(raw_input: &str) -> Option<TeamIdentity> {
    let needle = raw_input.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    // Exact canonical or alias match
    for entry in ROSTER {
        if entry.canonical.to_lowercase() == needle
            || entry.aliases.iter().any(|a| *a == needle)
        {
            return Some(entry.to_identity(raw_input));
        }
    }

    // Substring match, guarded against short inputs
    if needle.len() >= MIN_SUBSTRING_LEN {
        for entry in ROSTER {
            if entry.canonical.to_lowercase().contains(&needle) {
                return Some(entry.to_identity(raw_input));
            }
        }
    }

    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
