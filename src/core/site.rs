use crate::core::content::Snapshot;
use crate::core::sections::{self, SectionId, SectionView};
use crate::domain::ports::ConfigProvider;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

pub const DEFAULT_SPLASH: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotState {
    Pending,
    Ready(SectionView),
    /// Placeholder kept when a section could not be produced.
    Fallback(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSlot {
    pub id: SectionId,
    pub state: SlotState,
}

/// Mounted page: one slot per section, in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    slots: Vec<SectionSlot>,
}

impl Page {
    fn pending(requested: &[SectionId]) -> Self {
        let mut ids = requested.to_vec();
        ids.sort();
        ids.dedup();
        Self {
            slots: ids
                .into_iter()
                .map(|id| SectionSlot {
                    id,
                    state: SlotState::Pending,
                })
                .collect(),
        }
    }

    fn fill(&mut self, id: SectionId, state: SlotState) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.id == id) {
            slot.state = state;
        }
    }

    pub fn slots(&self) -> &[SectionSlot] {
        &self.slots
    }

    pub fn view(&self, id: SectionId) -> Option<&SectionView> {
        self.slots.iter().find(|s| s.id == id).and_then(|s| match &s.state {
            SlotState::Ready(view) => Some(view),
            _ => None,
        })
    }

    pub fn view_mut(&mut self, id: SectionId) -> Option<&mut SectionView> {
        self.slots
            .iter_mut()
            .find(|s| s.id == id)
            .and_then(|s| match &mut s.state {
                SlotState::Ready(view) => Some(view),
                _ => None,
            })
    }

    pub fn is_complete(&self) -> bool {
        self.slots
            .iter()
            .all(|s| matches!(s.state, SlotState::Ready(_)))
    }

    pub fn render_text(&self) -> String {
        self.slots
            .iter()
            .map(|slot| match &slot.state {
                SlotState::Ready(view) => view.render_text(),
                SlotState::Pending | SlotState::Fallback(_) => {
                    format!("{}\n", placeholder(slot.id))
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn placeholder(id: SectionId) -> &'static str {
    match id {
        SectionId::Footer => "Loading footer...",
        _ => "Loading...",
    }
}

/// Owns the content snapshot and mounts the page after the loading splash.
pub struct Site {
    snapshot: Arc<Snapshot>,
    splash: Duration,
}

impl Site {
    pub fn new(snapshot: Arc<Snapshot>) -> Self {
        Self {
            snapshot,
            splash: DEFAULT_SPLASH,
        }
    }

    pub fn from_config<C: ConfigProvider>(snapshot: Arc<Snapshot>, config: &C) -> Self {
        Self::new(snapshot).with_splash(Duration::from_millis(config.loading_screen_ms()))
    }

    pub fn with_splash(mut self, splash: Duration) -> Self {
        self.splash = splash;
        self
    }

    pub fn snapshot(&self) -> &Arc<Snapshot> {
        &self.snapshot
    }

    pub async fn mount(&self) -> Page {
        if !self.splash.is_zero() {
            tracing::info!("⏳ Loading portfolio ({:?} splash)", self.splash);
            tokio::time::sleep(self.splash).await;
        }
        let page = self.load_sections(&SectionId::ALL).await;
        tracing::info!("✅ Page mounted with {} sections", page.slots().len());
        page
    }

    pub async fn load_sections(&self, ids: &[SectionId]) -> Page {
        self.load_sections_with(ids, sections::render).await
    }

    /// Each section renders as its own task; slots stay in page order no
    /// matter which task finishes first.
    pub async fn load_sections_with<F>(&self, ids: &[SectionId], render: F) -> Page
    where
        F: Fn(SectionId, &Snapshot) -> SectionView + Send + Copy + 'static,
    {
        let mut page = Page::pending(ids);
        let mut tasks = JoinSet::new();

        for slot in page.slots() {
            let id = slot.id;
            let snapshot = Arc::clone(&self.snapshot);
            tasks.spawn(async move { (id, render(id, &snapshot)) });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((id, view)) => {
                    tracing::debug!("Section '{}' ready", id.name());
                    page.fill(id, SlotState::Ready(view));
                }
                Err(e) => tracing::warn!("⚠️ Section task failed: {}", e),
            }
        }

        // 失敗的區塊保留佔位內容
        for slot in page.slots.iter_mut() {
            if slot.state == SlotState::Pending {
                slot.state = SlotState::Fallback(placeholder(slot.id));
            }
        }

        page
    }
}
