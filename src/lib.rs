use log::{debug, info, warn};
use serde::Deserialize;
use std::fmt;

pub mod carousel;
pub mod components;
pub mod config;
pub mod dom;
pub mod geometry;
pub mod hooks;
pub mod momentum;
pub mod scheduler;
pub mod utils;

/// Testimonials shipped with the page.
pub const TESTIMONIALS_CSV: &str = include_str!("testimonials.csv");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub quote: String,
    pub avatar: String,
    /// Placeholder card that only widens the track.
    #[serde(default)]
    pub ghost: bool,
}

impl Testimonial {
    fn validate(&self, line: u64) -> Result<(), ContentError> {
        let field = if self.name.trim().is_empty() {
            "name"
        } else if self.quote.trim().is_empty() {
            "quote"
        } else {
            return Ok(());
        };
        Err(ContentError::MissingField { line, field })
    }
}

// Content loading errors
#[derive(Debug)]
pub enum ContentError {
    Csv(String),
    MissingField { line: u64, field: &'static str },
    Empty,
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Csv(msg) => write!(f, "Malformed testimonial CSV: {}", msg),
            ContentError::MissingField { line, field } => {
                write!(f, "Testimonial on line {} has no {}", line, field)
            }
            ContentError::Empty => write!(f, "No usable testimonial found"),
        }
    }
}

impl std::error::Error for ContentError {}

impl From<csv::Error> for ContentError {
    fn from(e: csv::Error) -> Self {
        ContentError::Csv(e.to_string())
    }
}

/// Parse testimonials from CSV with a `name,role,quote,avatar,ghost` header.
///
/// Rows that fail to parse (bad field count included) or lack a name or quote
/// are skipped.
pub fn read_testimonials_from_csv_string(csv_content: &str) -> Result<Vec<Testimonial>, ContentError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_content.as_bytes());
    let headers = reader.headers()?.clone();

    let mut testimonials = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                debug!("Warning: skipping malformed row on line {}: {}", line, e);
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let testimonial: Testimonial = match record.deserialize(Some(&headers)) {
            Ok(t) => t,
            Err(e) => {
                debug!("Warning: skipping testimonial on line {}: {}", line, e);
                continue;
            }
        };
        if let Err(e) = testimonial.validate(line) {
            debug!("Warning: {}", e);
            continue;
        }
        testimonials.push(testimonial);
    }

    if testimonials.is_empty() {
        return Err(ContentError::Empty);
    }
    info!("Loaded {} testimonials", testimonials.len());
    Ok(testimonials)
}

/// The embedded testimonials, or a single stock card if they cannot be read.
pub fn load_testimonials() -> Vec<Testimonial> {
    read_testimonials_from_csv_string(TESTIMONIALS_CSV).unwrap_or_else(|e| {
        warn!("{}", e);
        vec![Testimonial {
            name: "Tina Zhang".to_string(),
            role: "Responsable e‑commerce, Octave".to_string(),
            quote: "Site Shopify livré sans friction, visuels produits qui convertissent et une équipe qui anticipe.".to_string(),
            avatar: "https://i.pravatar.cc/96?img=21".to_string(),
            ghost: false,
        }]
    })
}

/// One card slot on the track.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackCard {
    pub key: String,
    pub testimonial: Testimonial,
    /// Copy of a leading card; hidden from assistive tech.
    pub duplicate: bool,
}

/// Lay the testimonials out on the track and repeat the first `lead` of them
/// at the end, so jumping from the end back to the start shows the same cards.
pub fn looped_track(testimonials: &[Testimonial], lead: usize) -> Vec<TrackCard> {
    let originals = testimonials.iter().enumerate().map(|(i, t)| TrackCard {
        key: format!("card-{}", i),
        testimonial: t.clone(),
        duplicate: false,
    });
    let copies = testimonials
        .iter()
        .take(lead.min(testimonials.len()))
        .enumerate()
        .map(|(i, t)| TrackCard {
            key: format!("dup-card-{}", i),
            testimonial: t.clone(),
            duplicate: true,
        });
    originals.chain(copies).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_testimonials_load() {
        let testimonials = read_testimonials_from_csv_string(TESTIMONIALS_CSV).unwrap();
        assert!(testimonials.len() >= 3);
        assert!(testimonials.iter().any(|t| t.ghost));
        assert!(testimonials.iter().all(|t| !t.name.is_empty()));
    }

    #[test]
    fn quoted_commas_survive() {
        let csv = "name,role,quote,avatar,ghost\n\
                   Jared Cole,\"Fondateur, Nimbus\",\"Moins de bricolage, plus de ventes.\",a.png,false\n";
        let testimonials = read_testimonials_from_csv_string(csv).unwrap();
        assert_eq!(testimonials.len(), 1);
        assert_eq!(testimonials[0].role, "Fondateur, Nimbus");
        assert_eq!(testimonials[0].quote, "Moins de bricolage, plus de ventes.");
    }

    #[test]
    fn bad_rows_are_skipped() {
        let csv = "name,role,quote,avatar,ghost\n\
                   ,Role,Quote,a.png,false\n\
                   Alexia,Role,Quote,a.png,maybe\n\
                   Alexia Fran,Marketing Lead,Lift mesurable.,b.png,false\n";
        let testimonials = read_testimonials_from_csv_string(csv).unwrap();
        assert_eq!(testimonials.len(), 1);
        assert_eq!(testimonials[0].name, "Alexia Fran");
    }

    #[test]
    fn rows_with_wrong_field_count_are_skipped() {
        let csv = "name,role,quote,avatar,ghost\n\
                   Hugo Bernard,Fondateur\n\
                   Inès Moreau,CMO,Visuels au top.,c.png,false\n";
        let testimonials = read_testimonials_from_csv_string(csv).unwrap();
        assert_eq!(testimonials.len(), 1);
        assert_eq!(testimonials[0].name, "Inès Moreau");
    }

    #[test]
    fn nothing_usable_is_an_error() {
        let csv = "name,role,quote,avatar,ghost\n,,,,false\n";
        assert!(matches!(
            read_testimonials_from_csv_string(csv),
            Err(ContentError::Empty)
        ));
        assert!(!load_testimonials().is_empty());
    }

    #[test]
    fn missing_field_message_names_the_line() {
        let err = ContentError::MissingField { line: 4, field: "quote" };
        assert_eq!(err.to_string(), "Testimonial on line 4 has no quote");
    }

    #[test]
    fn track_repeats_its_head() {
        let testimonials = read_testimonials_from_csv_string(TESTIMONIALS_CSV).unwrap();
        let track = looped_track(&testimonials, 2);
        assert_eq!(track.len(), testimonials.len() + 2);
        assert_eq!(track[testimonials.len()].testimonial, track[0].testimonial);
        assert_eq!(track[testimonials.len() + 1].testimonial, track[1].testimonial);
        assert!(track[testimonials.len()].duplicate);
        assert!(!track[0].duplicate);

        let short = looped_track(&testimonials[..1], 5);
        assert_eq!(short.len(), 2);
    }
}
