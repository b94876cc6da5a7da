use log::debug;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::{
    AnalysisServiceTrait, AnalysisSession, FrameworkConfig, FrameworkKey, FrameworkRegistry,
    FrameworkStatus,
};
use crate::deals::DealRecord;
use crate::errors::Result;
use crate::scoring::ScoringPolicy;

/// One framework row of an analysis view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkView {
    pub key: FrameworkKey,
    pub order: u32,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub status: FrameworkStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_score: Option<u8>,
}

/// Analysis state of one deal, in framework order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisView {
    pub deal_id: String,
    pub current: Option<FrameworkKey>,
    pub finished: bool,
    pub completed_count: usize,
    pub overall_progress: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,
    pub frameworks: Vec<FrameworkView>,
}

/// Keeps one analysis session per deal.
pub struct AnalysisService {
    config: FrameworkConfig,
    registry: FrameworkRegistry,
    policy: ScoringPolicy,
    sessions: RwLock<HashMap<String, AnalysisSession>>,
}

impl AnalysisService {
    pub fn new(config: FrameworkConfig, registry: FrameworkRegistry, policy: ScoringPolicy) -> Self {
        Self {
            config,
            registry,
            policy,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    fn render(&self, deal: &DealRecord, session: &AnalysisSession) -> AnalysisView {
        let progress = session.progress();
        let frameworks = session
            .sequence()
            .iter()
            .filter_map(|key| {
                let descriptor = self.config.descriptor(*key)?;
                let state = progress.state_of(*key);
                Some(FrameworkView {
                    key: *key,
                    order: descriptor.order,
                    name: descriptor.name.clone(),
                    icon: descriptor.icon.clone(),
                    description: descriptor.description.clone(),
                    status: state.status,
                    score: state.score,
                    suggested_score: self.registry.suggest(*key, deal, &self.policy),
                })
            })
            .collect();

        AnalysisView {
            deal_id: session.deal_id().to_string(),
            current: session.current(),
            finished: session.is_finished(),
            completed_count: progress.completed_count(),
            overall_progress: progress.overall_progress(),
            average_score: progress.average_score(),
            frameworks,
        }
    }

    /// Runs `edit` on the deal's session, creating it first if needed. The
    /// session is only stored when `edit` succeeds.
    fn with_session<F>(&self, deal: &DealRecord, edit: F) -> Result<AnalysisView>
    where
        F: FnOnce(&mut AnalysisSession) -> Result<()>,
    {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let mut session = sessions
            .get(&deal.id)
            .cloned()
            .unwrap_or_else(|| AnalysisSession::new(&deal.id, &self.config));
        edit(&mut session)?;
        let view = self.render(deal, &session);
        sessions.insert(deal.id.clone(), session);
        Ok(view)
    }
}

impl AnalysisServiceTrait for AnalysisService {
    fn framework_config(&self) -> &FrameworkConfig {
        &self.config
    }

    fn view(&self, deal: &DealRecord) -> AnalysisView {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        match sessions.get(&deal.id) {
            Some(session) => self.render(deal, session),
            None => self.render(deal, &AnalysisSession::new(&deal.id, &self.config)),
        }
    }

    fn select(&self, deal: &DealRecord, key: FrameworkKey) -> Result<AnalysisView> {
        self.with_session(deal, |session| session.select(key))
    }

    fn complete(
        &self,
        deal: &DealRecord,
        key: FrameworkKey,
        score: Option<u8>,
    ) -> Result<AnalysisView> {
        debug!("Completing {} for deal '{}' (score {:?})", key, deal.id, score);
        self.with_session(deal, |session| session.complete(key, score).map(|_| ()))
    }

    fn reset(&self, deal_id: &str) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(deal_id)
            .is_some()
    }
}
