//! Static landing-page content: hero slides and support-service cards.

use crate::models::Route;
use serde::{Deserialize, Serialize};

/// Horizontal placement of a slide's text block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    pub fn css_class(self) -> &'static str {
        match self {
            Alignment::Left => "text-left items-start",
            Alignment::Center => "text-center items-center",
            Alignment::Right => "text-right items-end",
        }
    }
}

/// One frame of the hero carousel.
///
/// Descriptors are defined once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDescriptor {
    pub image_ref: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    #[serde(default)]
    pub alignment: Alignment,
    pub accent_id: String,
}

impl SlideDescriptor {
    pub fn new(
        image_ref: &str,
        title: &str,
        subtitle: &str,
        description: &str,
        alignment: Alignment,
        accent_id: &str,
    ) -> Self {
        Self {
            image_ref: image_ref.to_string(),
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            description: description.to_string(),
            alignment,
            accent_id: accent_id.to_string(),
        }
    }
}

/// Card linking to one of the portal's support services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportService {
    pub title: String,
    pub description: String,
    pub icon_ref: String,
    pub route: Route,
}

/// Hero slides shown when the portal config does not override them
pub fn default_slides() -> Vec<SlideDescriptor> {
    vec![
        SlideDescriptor::new(
            "images/hero-voice.jpg",
            "Your Voice Matters",
            "Public Grievance Portal",
            "Raise a concern with the right department and follow it through to resolution.",
            Alignment::Left,
            "accent-blue",
        ),
        SlideDescriptor::new(
            "images/hero-track.jpg",
            "Track Every Step",
            "Transparent Case Handling",
            "See where your case stands at any time, from submission to closure.",
            Alignment::Center,
            "accent-emerald",
        ),
        SlideDescriptor::new(
            "images/hero-support.jpg",
            "Help When You Need It",
            "Dedicated Support",
            "Browse answers to common questions or reach out to our support team.",
            Alignment::Right,
            "accent-amber",
        ),
    ]
}

/// Support-service cards in display order
pub fn default_services() -> Vec<SupportService> {
    vec![
        SupportService {
            title: "Create a Case".to_string(),
            description: "File a new grievance or piece of feedback in a few minutes.".to_string(),
            icon_ref: "file-plus".to_string(),
            route: Route::CreateCase,
        },
        SupportService {
            title: "Track a Case".to_string(),
            description: "Check progress on a case you have already submitted.".to_string(),
            icon_ref: "search".to_string(),
            route: Route::TrackCase,
        },
        SupportService {
            title: "FAQs".to_string(),
            description: "Answers to the questions citizens ask most often.".to_string(),
            icon_ref: "help-circle".to_string(),
            route: Route::Faqs,
        },
    ]
}
