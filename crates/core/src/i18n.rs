//! Localized strings
//!
//! Keys are dotted paths (`recap.noData`). Values may contain `{{name}}`
//! placeholders filled from the params passed to `Translator::t_with`.
//! Unknown keys resolve to the key itself so a missing translation is visible
//! but never fatal.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    It,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::It];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::It => "it",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "en" => Some(Language::En),
            "it" => Some(Language::It),
            _ => None,
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Language::En => Language::It,
            Language::It => Language::En,
        }
    }

    /// Short month names used by the rolling date reel
    pub fn month_abbreviations(&self) -> [&'static str; 12] {
        match self {
            Language::En => [
                "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
            ],
            Language::It => [
                "GEN", "FEB", "MAR", "APR", "MAG", "GIU", "LUG", "AGO", "SET", "OTT", "NOV", "DIC",
            ],
        }
    }

    fn messages(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::En => EN,
            Language::It => IT,
        }
    }
}

/// Translation lookup for one language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn t(&self, key: &str) -> String {
        self.lookup(key).unwrap_or(key).to_string()
    }

    pub fn t_with(&self, key: &str, params: &[(&str, String)]) -> String {
        match self.lookup(key) {
            Some(template) => interpolate(template, params),
            None => key.to_string(),
        }
    }

    fn lookup(&self, key: &str) -> Option<&'static str> {
        self.language
            .messages()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

/// Replace `{{token}}` occurrences; unknown tokens become empty strings
fn interpolate(template: &str, params: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let token = after[..end].trim();
                if let Some((_, value)) = params.iter().find(|(name, _)| *name == token) {
                    out.push_str(value);
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

// ============================================================================
// Message tables
// ============================================================================

const EN: &[(&str, &str)] = &[
    ("providers.steam", "Steam"),
    ("providers.riot", "Riot Games"),
    ("home.title", "Your gaming year, wrapped"),
    ("home.generate", "Generate my Wrap"),
    ("home.replay", "Replay Wrap"),
    ("home.browse", "Browse scenes"),
    ("home.playerCard", "Player card"),
    ("home.syncing", "Syncing {{provider}}..."),
    ("home.fetching", "Fetching your recap..."),
    ("home.ready", "Your Wrap is ready"),
    ("home.noRecap", "No stats available yet. Sync at least one provider."),
    ("home.failed", "Something went wrong: {{error}}"),
    ("home.selectAtLeastOne", "Link at least one provider to generate a Wrap."),
    ("home.link", "Link {{provider}}"),
    ("home.language", "Language"),
    ("home.theme", "Theme"),
    ("home.themeDark", "Dark"),
    ("home.themeLight", "Light"),
    (
        "home.onboarding",
        "Link your accounts, generate a Wrap, then scroll or swipe through your year.",
    ),
    ("home.onboardingDismiss", "Got it"),
    ("recap.pause", "Pause"),
    ("recap.resume", "Resume"),
    ("recap.skip", "Skip"),
    ("recap.noData", "No data available"),
    ("recap.unknownPlayer", "Unknown player"),
    ("recap.unknownDate", "Unknown date"),
    ("recap.unknownGame", "Unknown game"),
    ("recap.introTitle", "Your profile"),
    ("recap.profileLevel", "Profile level"),
    ("recap.profileCreated", "Created on"),
    ("recap.yearsActive", "Years active"),
    ("recap.totalGamingTimeTitle", "Total gaming time"),
    ("recap.hoursShort", "HRS"),
    ("recap.hours", "hours"),
    ("recap.gamingTimeCopy", "You spent {{hours}} hours gaming"),
    ("recap.equivalentDays", "Equivalent days"),
    ("recap.equivalentMonths", "Equivalent months"),
    ("recap.topGenresTitle", "Top genres"),
    ("recap.topGenresSubtitle", "What you played the most"),
    ("recap.topGenresOther", "Other"),
    ("recap.topGamesTitle", "Top games"),
    ("recap.recentHoursTitle", "Last two weeks"),
    ("recap.hoursPlayed", "{{hours}} hours played"),
    ("recap.rareAchievementsTitle", "Rarest achievements"),
    ("recap.completedGamesTitle", "Completed games"),
    ("recap.steamTrophiesTitle", "Trophy cabinet"),
    ("recap.trophiesTotal", "{{count}} achievements unlocked"),
    ("recap.trophiesLabel", "trophies"),
    ("recap.trophiesMore", "+{{count}} more"),
    ("recap.trophyTierLegendary", "Legendary"),
    ("recap.trophyTierEpic", "Epic"),
    ("recap.trophyTierRare", "Rare"),
    ("recap.trophyTierUncommon", "Uncommon"),
    ("recap.trophyTierCommon", "Common"),
    ("recap.trophyTierUnknown", "Unknown rarity"),
    ("wrap.close", "Close"),
    ("wrap.myWrap", "My Wrap"),
    ("wrap.hint", "Scroll or swipe to move between scenes"),
    ("playerCard.title", "Player card"),
    ("playerCard.subtitle", "Your {{year}} at a glance"),
    ("playerCard.totalHours", "Total hours"),
    ("playerCard.longestSession", "Longest session"),
    ("playerCard.recentHours", "Recent hours"),
    ("playerCard.gamesOwned", "Games owned"),
    ("playerCard.topGame", "Top game"),
    ("playerCard.playstyle", "Playstyle"),
    ("playerCard.riotTitle", "Competitive"),
    ("playerCard.rank", "Rank"),
    ("playerCard.record", "Wins / Losses"),
    ("playerCard.winRate", "Win rate"),
    ("playerCard.favorite", "Favorite"),
    ("playerCard.season", "Season {{year}}"),
    ("playerCard.profile", "Profile"),
    ("playerCard.stats", "Stats"),
    ("playerCard.steam", "Steam library"),
    ("playerCard.topGames", "Top games"),
    ("playerCard.topGenres", "Top genres"),
    ("playerCard.achievements", "Achievements"),
    ("playerCard.rareAchievements", "Rare achievements"),
    ("playerCard.completedGames", "Completed games"),
    ("playerCard.wins", "Wins"),
    ("playerCard.losses", "Losses"),
    ("wrap.browse", "Browse"),
    ("wrap.previous", "Previous"),
    ("wrap.next", "Next"),
];

const IT: &[(&str, &str)] = &[
    ("providers.steam", "Steam"),
    ("providers.riot", "Riot Games"),
    ("home.title", "Il tuo anno di gioco, riassunto"),
    ("home.generate", "Genera il mio Wrap"),
    ("home.replay", "Rivedi il Wrap"),
    ("home.browse", "Sfoglia le scene"),
    ("home.playerCard", "Scheda giocatore"),
    ("home.syncing", "Sincronizzazione {{provider}}..."),
    ("home.fetching", "Recupero del riepilogo..."),
    ("home.ready", "Il tuo Wrap è pronto"),
    ("home.noRecap", "Nessuna statistica disponibile. Sincronizza almeno un provider."),
    ("home.failed", "Qualcosa è andato storto: {{error}}"),
    ("home.selectAtLeastOne", "Collega almeno un provider per generare un Wrap."),
    ("home.link", "Collega {{provider}}"),
    ("home.language", "Lingua"),
    ("home.theme", "Tema"),
    ("home.themeDark", "Scuro"),
    ("home.themeLight", "Chiaro"),
    ("home.onboarding", "Collega i tuoi account, genera un Wrap e scorri il tuo anno."),
    ("home.onboardingDismiss", "Ho capito"),
    ("recap.pause", "Pausa"),
    ("recap.resume", "Riprendi"),
    ("recap.skip", "Salta"),
    ("recap.noData", "Nessun dato disponibile"),
    ("recap.unknownPlayer", "Giocatore sconosciuto"),
    ("recap.unknownDate", "Data sconosciuta"),
    ("recap.unknownGame", "Gioco sconosciuto"),
    ("recap.introTitle", "Il tuo profilo"),
    ("recap.profileLevel", "Livello profilo"),
    ("recap.profileCreated", "Creato il"),
    ("recap.yearsActive", "Anni di attività"),
    ("recap.totalGamingTimeTitle", "Tempo di gioco totale"),
    ("recap.hoursShort", "ORE"),
    ("recap.hours", "ore"),
    ("recap.gamingTimeCopy", "Hai passato {{hours}} ore a giocare"),
    ("recap.equivalentDays", "Giorni equivalenti"),
    ("recap.equivalentMonths", "Mesi equivalenti"),
    ("recap.topGenresTitle", "Generi preferiti"),
    ("recap.topGenresSubtitle", "Quello che hai giocato di più"),
    ("recap.topGenresOther", "Altro"),
    ("recap.topGamesTitle", "Giochi preferiti"),
    ("recap.recentHoursTitle", "Ultime due settimane"),
    ("recap.hoursPlayed", "{{hours}} ore giocate"),
    ("recap.rareAchievementsTitle", "Obiettivi più rari"),
    ("recap.completedGamesTitle", "Giochi completati"),
    ("recap.steamTrophiesTitle", "Bacheca trofei"),
    ("recap.trophiesTotal", "{{count}} obiettivi sbloccati"),
    ("recap.trophiesLabel", "trofei"),
    ("recap.trophiesMore", "+{{count}} altri"),
    ("recap.trophyTierLegendary", "Leggendario"),
    ("recap.trophyTierEpic", "Epico"),
    ("recap.trophyTierRare", "Raro"),
    ("recap.trophyTierUncommon", "Non comune"),
    ("recap.trophyTierCommon", "Comune"),
    ("recap.trophyTierUnknown", "Rarità sconosciuta"),
    ("wrap.close", "Chiudi"),
    ("wrap.myWrap", "Il mio Wrap"),
    ("wrap.hint", "Scorri per passare da una scena all'altra"),
    ("playerCard.title", "Scheda giocatore"),
    ("playerCard.subtitle", "Il tuo {{year}} in breve"),
    ("playerCard.totalHours", "Ore totali"),
    ("playerCard.longestSession", "Sessione più lunga"),
    ("playerCard.recentHours", "Ore recenti"),
    ("playerCard.gamesOwned", "Giochi posseduti"),
    ("playerCard.topGame", "Gioco preferito"),
    ("playerCard.playstyle", "Stile di gioco"),
    ("playerCard.riotTitle", "Competitivo"),
    ("playerCard.rank", "Rango"),
    ("playerCard.record", "Vittorie / Sconfitte"),
    ("playerCard.winRate", "Percentuale vittorie"),
    ("playerCard.favorite", "Preferito"),
    ("playerCard.season", "Stagione {{year}}"),
    ("playerCard.profile", "Profilo"),
    ("playerCard.stats", "Statistiche"),
    ("playerCard.steam", "Libreria Steam"),
    ("playerCard.topGames", "Giochi preferiti"),
    ("playerCard.topGenres", "Generi preferiti"),
    ("playerCard.achievements", "Obiettivi"),
    ("playerCard.rareAchievements", "Obiettivi rari"),
    ("playerCard.completedGames", "Giochi completati"),
    ("playerCard.wins", "Vittorie"),
    ("playerCard.losses", "Sconfitte"),
    ("wrap.browse", "Sfoglia"),
    ("wrap.previous", "Precedente"),
    ("wrap.next", "Successiva"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_params() {
        let t = Translator::new(Language::En);
        assert_eq!(
            t.t_with("recap.gamingTimeCopy", &[("hours", "240".to_string())]),
            "You spent 240 hours gaming"
        );
    }

    #[test]
    fn missing_param_renders_empty() {
        assert_eq!(interpolate("a {{x}} b", &[]), "a  b");
        assert_eq!(interpolate("open {{ never closed", &[]), "open {{ never closed");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        let t = Translator::new(Language::It);
        assert_eq!(t.t("recap.doesNotExist"), "recap.doesNotExist");
        assert_eq!(t.t("recap.noData"), "Nessun dato disponibile");
    }

    #[test]
    fn every_english_key_has_an_italian_translation() {
        let missing: Vec<&str> = EN
            .iter()
            .map(|(k, _)| *k)
            .filter(|k| !IT.iter().any(|(it, _)| it == k))
            .collect();
        assert!(missing.is_empty(), "missing Italian keys: {:?}", missing);
    }
}
