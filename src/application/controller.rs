use crate::domain::payment::{PaymentDetails, parse_payment_url};
use crate::domain::ports::{PaymentApiBox, ScannerBox, TransactionLogBox};
use crate::domain::transaction::Transaction;
use crate::domain::view_state::{PipelineEvent, ViewState};
use crate::error::ScanPayError;
use tokio::sync::watch;

/// Drives one scan-to-payment attempt at a time and publishes the view state.
///
/// Subscribers receive a new [`ViewState`] only when a field actually changed.
/// Errors never escape: every failure ends up in `error_message`.
pub struct PaymentController {
    scanner: ScannerBox,
    payments: PaymentApiBox,
    history: Option<TransactionLogBox>,
    state: watch::Sender<ViewState>,
}

impl PaymentController {
    pub fn new(scanner: ScannerBox, payments: PaymentApiBox) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            scanner,
            payments,
            history: None,
            state,
        }
    }

    /// Records every submitted attempt in `history`.
    pub fn with_history(mut self, history: TransactionLogBox) -> Self {
        self.history = Some(history);
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Runs scan, parse and submit in sequence.
    ///
    /// A call made while another run is processing returns without effect.
    /// Dropping the returned future mid-run ends the run as interrupted.
    pub async fn on_scan_qr_code(&self) {
        let mut started = false;
        self.state.send_if_modified(|state| {
            started = state.apply(PipelineEvent::Started);
            started
        });
        if !started {
            tracing::debug!("payment already in progress");
            return;
        }
        let run = RunGuard::new(&self.state);

        let outcome = match self.run().await {
            Ok(details) => PipelineEvent::PaymentSucceeded {
                amount: details.amount,
            },
            Err(event) => event,
        };
        tracing::debug!(?outcome, "pipeline finished");
        run.finish(outcome);
    }

    async fn run(&self) -> Result<PaymentDetails, PipelineEvent> {
        let payload = self
            .scanner
            .scan()
            .await
            .map_err(|e| PipelineEvent::ScanFailed(e.to_string()))?;

        let details =
            parse_payment_url(&payload).map_err(|e| PipelineEvent::ParseFailed(e.to_string()))?;

        let mut tx = Transaction::pending(&details);
        let submitted = self.payments.submit(&details).await;
        tx.settle(matches!(submitted, Ok(true)));
        self.record(tx).await;

        match submitted {
            Ok(true) => Ok(details),
            Ok(false) => Err(PipelineEvent::PaymentFailed(
                ScanPayError::PaymentFailed.to_string(),
            )),
            Err(e) => Err(PipelineEvent::PaymentFailed(e.to_string())),
        }
    }

    async fn record(&self, tx: Transaction) {
        if let Some(history) = &self.history
            && let Err(e) = history.record(tx).await
        {
            tracing::warn!(error = %e, "failed to record transaction history");
        }
    }
}

/// Owns the Processing phase of one run and always hands it back to Idle.
struct RunGuard<'a> {
    state: &'a watch::Sender<ViewState>,
    finished: bool,
}

impl<'a> RunGuard<'a> {
    fn new(state: &'a watch::Sender<ViewState>) -> Self {
        Self {
            state,
            finished: false,
        }
    }

    fn finish(mut self, outcome: PipelineEvent) {
        self.finished = true;
        self.state.send_if_modified(|state| state.apply(outcome));
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        tracing::warn!("payment run dropped before completion");
        self.state.send_if_modified(|state| {
            state.apply(PipelineEvent::Interrupted(
                ScanPayError::Interrupted.to_string(),
            ))
        });
    }
}
