//! Domain-term keyword table used to bias upstream image searches.
//!
//! Lookup walks [`DOMAIN_KEYWORDS`] in order and returns the first entry whose
//! term occurs in the lowercased query. Named moons come before planets so
//! that "titan saturn" resolves to Titan, and the bare `moon` and `sun`
//! entries come after every named body.

pub const DOMAIN_KEYWORDS: &[(&str, &str)] = &[
    // Named moons
    ("europa", "europa,jupiter,moon,galileo,juno"),
    ("ganymede", "ganymede,jupiter,moon,galileo,juno"),
    ("callisto", "callisto,jupiter,moon,galileo"),
    ("titan", "titan,saturn,moon,cassini,huygens"),
    ("enceladus", "enceladus,saturn,moon,cassini,plumes"),
    ("triton", "triton,neptune,moon,voyager"),
    ("charon", "charon,pluto,moon,new horizons"),
    ("phobos", "phobos,mars,moon"),
    ("deimos", "deimos,mars,moon"),
    // Planets and dwarf planets
    ("mercury", "mercury,planet,messenger"),
    ("venus", "venus,planet,magellan"),
    ("earth", "earth,planet,blue marble"),
    // `SearchService` answers any query containing "mars" from the rover feed,
    // so this entry only applies to direct `keywords_for` callers.
    ("mars", "mars,planet,rover,red planet"),
    ("jupiter", "jupiter,planet,juno,great red spot"),
    ("saturn", "saturn,planet,rings,cassini"),
    ("uranus", "uranus,planet,voyager"),
    ("neptune", "neptune,planet,voyager"),
    ("pluto", "pluto,dwarf planet,new horizons"),
    // Generic bodies
    ("moon", "moon,lunar,apollo"),
    ("sun", "sun,solar,sdo,corona"),
    // Categories
    ("black hole", "black hole,event horizon,galaxy"),
    ("nebula", "nebula,hubble,star formation"),
    ("galaxy", "galaxy,hubble,deep field"),
    ("asteroid", "asteroid,osiris-rex,dawn"),
    ("comet", "comet,rosetta,coma"),
    ("supernova", "supernova,remnant,chandra"),
    ("star cluster", "star cluster,globular cluster,hubble"),
    ("exoplanet", "exoplanet,kepler,tess"),
    ("aurora", "aurora,earth,magnetosphere"),
    // Observatories
    ("hubble", "hubble,telescope,deep field"),
    ("webb", "webb,jwst,infrared"),
];

/// Returns the keyword string for the first domain term found in `query`.
#[must_use]
pub fn keywords_for(query: &str) -> Option<&'static str> {
    let query = query.to_lowercase();
    DOMAIN_KEYWORDS
        .iter()
        .find(|(term, _)| query.contains(term))
        .map(|(_, keywords)| *keywords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_term_lookup() {
        assert_eq!(keywords_for("Saturn"), Some("saturn,planet,rings,cassini"));
        assert_eq!(keywords_for("crab NEBULA"), Some("nebula,hubble,star formation"));
        assert_eq!(keywords_for("quasar"), None);
    }

    #[test]
    fn test_moons_win_over_planets() {
        assert_eq!(
            keywords_for("titan saturn"),
            Some("titan,saturn,moon,cassini,huygens")
        );
        assert_eq!(
            keywords_for("saturn titan"),
            Some("titan,saturn,moon,cassini,huygens")
        );
    }

    #[test]
    fn test_planet_wins_over_generic_moon() {
        assert_eq!(keywords_for("earth moon"), Some("earth,planet,blue marble"));
        assert_eq!(keywords_for("sun and moon"), Some("moon,lunar,apollo"));
    }

    #[test]
    fn test_multiword_terms() {
        assert_eq!(
            keywords_for("Black Hole jets"),
            Some("black hole,event horizon,galaxy")
        );
    }

    #[test]
    fn test_table_terms_are_unique_and_lowercase() {
        let mut seen = std::collections::HashSet::new();
        for (term, keywords) in DOMAIN_KEYWORDS {
            assert_eq!(*term, term.to_lowercase());
            assert!(seen.insert(*term), "duplicate term {term}");
            assert!(!keywords.is_empty());
        }
        assert_eq!(DOMAIN_KEYWORDS.len(), 31);
    }
}
