use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Processing,
}

/// Transitions of the pipeline controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    Started,
    ScanFailed(String),
    ParseFailed(String),
    PaymentFailed(String),
    /// The run was abandoned before any outcome was known.
    Interrupted(String),
    PaymentSucceeded { amount: Decimal },
}

/// Observable state of the payment screen.
///
/// Outcome messages are side channels of the `Processing -> Idle` transition:
/// at most one of them is non-empty once a run has finished.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub phase: Phase,
    pub error_message: String,
    pub success_message: String,
}

impl ViewState {
    pub fn is_processing(&self) -> bool {
        self.phase == Phase::Processing
    }

    /// Applies `event` and reports whether anything observable changed.
    ///
    /// Events that are not valid in the current phase are ignored.
    pub fn apply(&mut self, event: PipelineEvent) -> bool {
        let before = self.clone();

        match (self.phase, event) {
            (Phase::Idle, PipelineEvent::Started) => {
                self.phase = Phase::Processing;
                self.error_message.clear();
                self.success_message.clear();
            }
            (
                Phase::Processing,
                PipelineEvent::ScanFailed(message)
                | PipelineEvent::ParseFailed(message)
                | PipelineEvent::PaymentFailed(message)
                | PipelineEvent::Interrupted(message),
            ) => {
                self.phase = Phase::Idle;
                self.error_message = message;
            }
            (Phase::Processing, PipelineEvent::PaymentSucceeded { amount }) => {
                self.phase = Phase::Idle;
                self.success_message = success_message(amount);
            }
            (phase, event) => {
                tracing::debug!(?phase, ?event, "ignoring transition");
                return false;
            }
        }

        *self != before
    }
}

pub fn success_message(amount: Decimal) -> String {
    format!("Payment of {amount} successfully processed")
}
