use super::entities::{Breakdown, JobParams, NamedItem, TypeId};
use super::input::{parse_job_params, select_type_id};

pub const NO_PRODUCT_MESSAGE: &str = "Pick a ship or enter a valid Type ID / EVE Ref URL.";

/// Selector contents, loaded once at startup.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum HullList {
    #[default]
    Loading,
    Ready(Vec<NamedItem>),
    Failed(String),
}

impl HullList {
    pub fn items(&self) -> &[NamedItem] {
        match self {
            HullList::Ready(items) => items,
            _ => &[],
        }
    }
}

/// Raw form inputs as typed by the user.
#[derive(Clone, Debug, PartialEq)]
pub struct CalcForm {
    pub selected: Option<TypeId>,
    pub manual: String,
    pub runs: String,
    pub me: String,
    pub te: String,
}

impl Default for CalcForm {
    fn default() -> Self {
        Self {
            selected: None,
            manual: String::new(),
            runs: "1".to_string(),
            me: "0".to_string(),
            te: "0".to_string(),
        }
    }
}

impl CalcForm {
    /// Product and clamped job parameters, or the message to show instead.
    pub fn request(&self) -> Result<(TypeId, JobParams), String> {
        let type_id =
            select_type_id(self.selected, &self.manual).ok_or_else(|| NO_PRODUCT_MESSAGE.to_string())?;
        Ok((type_id, parse_job_params(&self.runs, &self.me, &self.te)))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CalcOutcome {
    Ready(Breakdown),
    Failed(String),
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub hulls: HullList,
    pub form: CalcForm,
    pub outcome: Option<CalcOutcome>,
    /// A calculation is in flight.
    pub busy: bool,
}

impl AppState {
    /// Clears the previous result so stale numbers never sit next to a new request.
    pub fn begin_calculation(&mut self) {
        self.busy = true;
        self.outcome = None;
    }

    pub fn finish_calculation(&mut self, result: Result<Breakdown, String>) {
        self.busy = false;
        self.outcome = Some(match result {
            Ok(breakdown) => CalcOutcome::Ready(breakdown),
            Err(message) => CalcOutcome::Failed(message),
        });
    }

    #[cfg(test)]
    pub fn breakdown(&self) -> Option<&Breakdown> {
        match &self.outcome {
            Some(CalcOutcome::Ready(breakdown)) => Some(breakdown),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CostTotals;

    fn sample_breakdown() -> Breakdown {
        Breakdown {
            type_id: 645,
            product_name: "Dominix".into(),
            params: JobParams::default(),
            rows: Vec::new(),
            totals: CostTotals::default(),
            raw: serde_json::json!({}),
        }
    }

    #[test]
    fn form_requires_a_product() {
        let form = CalcForm::default();
        assert_eq!(form.request(), Err(NO_PRODUCT_MESSAGE.to_string()));
    }

    #[test]
    fn form_clamps_parameters() {
        let form = CalcForm {
            manual: "https://everef.net/type/645".into(),
            runs: "0".into(),
            me: "-5".into(),
            te: "8".into(),
            ..CalcForm::default()
        };
        assert_eq!(
            form.request(),
            Ok((
                645,
                JobParams {
                    runs: 1,
                    me: 0,
                    te: 8
                }
            ))
        );
    }

    #[test]
    fn failure_replaces_previous_breakdown() {
        let mut state = AppState::default();
        state.finish_calculation(Ok(sample_breakdown()));
        assert!(state.breakdown().is_some());

        state.begin_calculation();
        assert!(state.busy);
        assert!(state.outcome.is_none());

        state.finish_calculation(Err("boom".into()));
        assert!(!state.busy);
        assert_eq!(state.outcome, Some(CalcOutcome::Failed("boom".into())));
        assert!(state.breakdown().is_none());
    }

    #[test]
    fn hull_items_are_empty_until_ready() {
        assert!(HullList::Loading.items().is_empty());
        let ready = HullList::Ready(vec![NamedItem::new(645, "Dominix")]);
        assert_eq!(ready.items().len(), 1);
    }
}
