//! Tutorial generation.
//!
//! The default source is a simulation: it waits a fixed delay and builds a
//! fixed-shape tutorial from the product shown on the page. A remote source
//! calling the backend's generate endpoint sits behind the same trait.

use aa_api_types::{Tutorial, TutorialGenerateResponse, TutorialStep};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::busy::{BusyGuard, Control, GENERATING_LABEL};
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::transport::Transport;

pub const NOTHING_TO_SHARE: &str = "No tutorial to share yet!";
pub const SHARED: &str = "Tutorial text copied to clipboard!";
pub const GENERATION_FAILED: &str = "Failed to generate tutorial";

/// Product data embedded in the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductInfo {
    pub id: String,
    pub name: String,
    /// `", "`-separated list.
    pub materials: String,
    pub has_tutorial: bool,
}

impl ProductInfo {
    pub fn materials_list(&self) -> Vec<String> {
        self.materials
            .split(", ")
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, ms: u32);
}

#[async_trait(?Send)]
pub trait TutorialSource {
    async fn generate(&self, product: &ProductInfo) -> Result<Tutorial>;
}

fn step(step_number: u32, title: &str, description: &str, tips: [&str; 2]) -> TutorialStep {
    TutorialStep {
        step_number,
        title: title.to_owned(),
        description: description.to_owned(),
        tips: tips.iter().map(|t| (*t).to_owned()).collect(),
    }
}

pub fn synthesize_tutorial(product: &ProductInfo, created_date: &str) -> Tutorial {
    Tutorial {
        title: format!("How to Make {}", product.name),
        description: format!("Step-by-step guide to create your {}", product.name),
        estimated_time: "2 hours".to_owned(),
        difficulty: "beginner".to_owned(),
        created_date: created_date.to_owned(),
        materials_needed: product.materials_list(),
        steps: vec![
            step(
                1,
                "Prepare Materials",
                "Gather all the materials listed above.",
                ["Double-check quantities", "Keep your workspace clean"],
            ),
            step(
                2,
                "Start Crafting",
                "Follow the steps carefully to assemble your product.",
                ["Work slowly", "Use safety equipment if needed"],
            ),
            step(
                3,
                "Finish and Review",
                "Finalize your product and check for mistakes.",
                ["Take photos", "Share your creation!"],
            ),
        ],
    }
}

pub struct SimulatedTutorialSource<'a, T: Timer + ?Sized> {
    timer: &'a T,
    delay_ms: u32,
    today: String,
}

impl<'a, T: Timer + ?Sized> SimulatedTutorialSource<'a, T> {
    pub fn new(timer: &'a T, delay_ms: u32, today: impl Into<String>) -> Self {
        Self {
            timer,
            delay_ms,
            today: today.into(),
        }
    }
}

#[async_trait(?Send)]
impl<'a, T: Timer + ?Sized> TutorialSource for SimulatedTutorialSource<'a, T> {
    async fn generate(&self, product: &ProductInfo) -> Result<Tutorial> {
        self.timer.sleep(self.delay_ms).await;
        Ok(synthesize_tutorial(product, &self.today))
    }
}

pub struct RemoteTutorialSource<'a, T: Transport + ?Sized> {
    transport: &'a T,
    config: &'a StorefrontConfig,
}

impl<'a, T: Transport + ?Sized> RemoteTutorialSource<'a, T> {
    pub fn new(transport: &'a T, config: &'a StorefrontConfig) -> Self {
        Self { transport, config }
    }
}

#[async_trait(?Send)]
impl<'a, T: Transport + ?Sized> TutorialSource for RemoteTutorialSource<'a, T> {
    async fn generate(&self, product: &ProductInfo) -> Result<Tutorial> {
        let path = self.config.endpoints.tutorial_generate(&product.id);
        let reply = self.transport.get(&path).await?;
        if reply.status == 401 {
            return Err(StorefrontError::Unauthorized);
        }
        let resp: TutorialGenerateResponse = reply.json()?;
        match resp.tutorial {
            Some(tutorial) if reply.is_success() && resp.success => Ok(tutorial),
            _ => Err(StorefrontError::Server {
                status: reply.status,
                message: resp.error.unwrap_or_else(|| GENERATION_FAILED.to_owned()),
            }),
        }
    }
}

/// Run one generation with `trigger` disabled for its whole duration.
pub async fn generate_tutorial<S, C>(source: &S, product: &ProductInfo, trigger: &C) -> Result<Tutorial>
where
    S: TutorialSource + ?Sized,
    C: Control + ?Sized,
{
    let _busy = BusyGuard::engage(trigger, GENERATING_LABEL);
    let tutorial = source.generate(product).await?;
    tracing::debug!(product = %product.id, steps = tutorial.steps.len(), "tutorial generated");
    Ok(tutorial)
}

/// Clipboard text for sharing, or the refusal notice.
pub fn share_text(tutorial: Option<&Tutorial>) -> Result<String> {
    tutorial
        .map(|t| format!("{}\n{}", t.title, t.description))
        .ok_or_else(|| StorefrontError::Validation(NOTHING_TO_SHARE.to_owned()))
}

/// Tutorial presence on the page.
#[derive(Debug, Clone, Default)]
pub struct TutorialState {
    tutorial: Option<Tutorial>,
    content_visible: bool,
}

impl TutorialState {
    pub fn new(existing: Option<Tutorial>) -> Self {
        Self {
            tutorial: existing,
            content_visible: false,
        }
    }

    pub fn current(&self) -> Option<&Tutorial> {
        self.tutorial.as_ref()
    }

    /// Store a freshly generated tutorial; its full view starts hidden.
    pub fn set_generated(&mut self, tutorial: Tutorial) {
        self.tutorial = Some(tutorial);
        self.content_visible = false;
    }

    /// Reveal the full view. Returns false when there is nothing to show.
    pub fn reveal(&mut self) -> bool {
        self.content_visible = self.tutorial.is_some();
        self.content_visible
    }

    pub fn content_visible(&self) -> bool {
        self.content_visible
    }

    /// Whether the container should be shown on page load.
    pub fn show_on_load(&self, product: &ProductInfo) -> bool {
        product.has_tutorial && self.tutorial.is_some()
    }
}
