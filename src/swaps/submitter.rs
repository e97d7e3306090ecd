/// Submit-and-confirm state machine
///
/// ```text
/// Sent ──skip confirmation──────────────────────────► Confirmed
///  │
///  └─► Polling ──status err──────────────────────────► Failed
///        │  ▲   ──level ≥ commitment─────────────────► Confirmed
///        │  │   ──retries / deadline / blockhash gone► TimedOut
///        └──┘ no status yet: wait check interval, maybe resend
/// ```
///
/// The transaction is sent once; a failed send is terminal. Only the status
/// polling is retried.
use super::types::{SignedSwap, SwapOptions};
use crate::errors::SwapError;
use crate::logger::{self, LogTag};
use crate::rpc::{NodeClient, SignatureStatus};
use solana_sdk::signature::Signature;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Sent,
    Polling { attempt: u32 },
    Confirmed,
    Failed,
    TimedOut,
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionState::Sent => write!(f, "SENT"),
            SubmissionState::Polling { attempt } => write!(f, "POLLING#{}", attempt),
            SubmissionState::Confirmed => write!(f, "CONFIRMED"),
            SubmissionState::Failed => write!(f, "FAILED"),
            SubmissionState::TimedOut => write!(f, "TIMED_OUT"),
        }
    }
}

/// Outcome of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub signature: Signature,
    pub state: SubmissionState,
    /// Status queries performed
    pub polls: u32,
    /// Extra sends beyond the first
    pub resends: u32,
    /// Time from the send call to the verdict
    pub elapsed: Duration,
    /// False when confirmation was skipped
    pub verified: bool,
}

/// One submission in flight: the signed transaction plus its bookkeeping
struct Submission<'a, N: ?Sized> {
    node: &'a N,
    signed: &'a SignedSwap,
    options: &'a SwapOptions,
    signature: Signature,
    state: SubmissionState,
    started: Instant,
    last_send: Instant,
    polls: u32,
    resends: u32,
}

impl<'a, N> Submission<'a, N>
where
    N: NodeClient + ?Sized,
{
    fn transition(&mut self, next: SubmissionState) {
        logger::verbose(
            LogTag::Swap,
            &format!("{}: {} → {}", short_sig(&self.signature), self.state, next),
        );
        self.state = next;
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn report(&self, verified: bool) -> SubmissionReport {
        SubmissionReport {
            signature: self.signature,
            state: self.state,
            polls: self.polls,
            resends: self.resends,
            elapsed: self.started.elapsed(),
            verified,
        }
    }

    fn timed_out(&mut self) -> SwapError {
        self.transition(SubmissionState::TimedOut);
        logger::warning(
            LogTag::Swap,
            &format!(
                "Confirmation of {} timed out after {} polls ({}ms)",
                self.signature,
                self.polls,
                self.elapsed_ms()
            ),
        );
        SwapError::Timeout {
            signature: self.signature,
            polls: self.polls,
            elapsed_ms: self.elapsed_ms(),
        }
    }

    fn deadline_passed(&self) -> bool {
        self.options
            .confirmation_retry_timeout
            .map(|limit| self.started.elapsed() >= limit)
            .unwrap_or(false)
    }

    /// Check interval, shortened so the sleep never overruns the deadline
    fn next_wait(&self) -> Duration {
        let interval = self.options.confirmation_check_interval;
        match self.options.confirmation_retry_timeout {
            Some(limit) => interval.min(limit.saturating_sub(self.started.elapsed())),
            None => interval,
        }
    }

    /// Poll until a verdict; `Ok` only once the commitment is reached
    async fn poll(&mut self) -> Result<(), SwapError> {
        let retries = self.options.confirmation_retries;

        for attempt in 1..=retries {
            if attempt > 1 && self.deadline_passed() {
                return Err(self.timed_out());
            }

            self.transition(SubmissionState::Polling { attempt });
            self.polls += 1;

            let status = self
                .node
                .get_signature_status(&self.signature)
                .await
                .map_err(|e| SwapError::network("querying signature status", e))?;

            match status {
                Some(status) if status.is_failed() => {
                    let error = status.err.unwrap_or_default();
                    self.transition(SubmissionState::Failed);
                    logger::error(
                        LogTag::Swap,
                        &format!("Transaction {} failed on-chain: {}", self.signature, error),
                    );
                    return Err(SwapError::Confirmation {
                        signature: self.signature,
                        error,
                    });
                }
                Some(status) if status.reaches(self.options.commitment) => {
                    self.transition(SubmissionState::Confirmed);
                    logger::info(
                        LogTag::Swap,
                        &format!(
                            "Transaction {} reached {} after {} polls ({}ms)",
                            short_sig(&self.signature),
                            level_label(&status),
                            self.polls,
                            self.elapsed_ms()
                        ),
                    );
                    return Ok(());
                }
                Some(status) => {
                    logger::debug(
                        LogTag::Swap,
                        &format!(
                            "Poll {}/{}: {} is {}, waiting for {}",
                            attempt,
                            retries,
                            short_sig(&self.signature),
                            level_label(&status),
                            self.options.commitment
                        ),
                    );
                }
                None => {
                    logger::debug(
                        LogTag::Swap,
                        &format!(
                            "Poll {}/{}: no status yet for {}",
                            attempt,
                            retries,
                            short_sig(&self.signature)
                        ),
                    );
                }
            }

            if attempt == retries {
                break;
            }
            if self.deadline_passed() {
                return Err(self.timed_out());
            }

            self.maybe_resend().await?;
            tokio::time::sleep(self.next_wait()).await;
        }

        Err(self.timed_out())
    }

    /// Re-send the same signed transaction once `resend_interval` has passed
    ///
    /// Checks the block height first: past the last valid height the
    /// transaction can never land; inside the buffer a resend is pointless.
    async fn maybe_resend(&mut self) -> Result<(), SwapError> {
        let interval = match self.options.resend_interval {
            Some(interval) => interval,
            None => return Ok(()),
        };
        if self.last_send.elapsed() < interval {
            return Ok(());
        }

        let block_height = match self.node.get_block_height().await {
            Ok(height) => height,
            Err(e) => {
                self.last_send = Instant::now();
                logger::warning(
                    LogTag::Rpc,
                    &format!("Block height check failed, skipping resend: {}", e),
                );
                return Ok(());
            }
        };

        let last_valid = self.signed.last_valid_block_height;
        if block_height > last_valid {
            self.transition(SubmissionState::TimedOut);
            logger::warning(
                LogTag::Swap,
                &format!(
                    "Blockhash of {} expired at height {} (last valid {})",
                    self.signature, block_height, last_valid
                ),
            );
            return Err(SwapError::BlockhashExpired {
                signature: self.signature,
                block_height,
                last_valid_block_height: last_valid,
            });
        }

        // Postpone the next check either way
        self.last_send = Instant::now();

        if block_height.saturating_add(self.options.last_valid_block_height_buffer) >= last_valid {
            logger::debug(
                LogTag::Swap,
                &format!(
                    "Not resending {}: height {} within {} blocks of expiry ({})",
                    short_sig(&self.signature),
                    block_height,
                    self.options.last_valid_block_height_buffer,
                    last_valid
                ),
            );
            return Ok(());
        }

        match self
            .node
            .send_transaction(&self.signed.transaction, &self.options.send_options)
            .await
        {
            Ok(_) => {
                self.resends += 1;
                logger::debug(
                    LogTag::Swap,
                    &format!(
                        "Resent {} (resend #{}, height {})",
                        short_sig(&self.signature),
                        self.resends,
                        block_height
                    ),
                );
            }
            Err(e) => {
                logger::warning(
                    LogTag::Swap,
                    &format!("Resend of {} failed: {}", short_sig(&self.signature), e),
                );
            }
        }

        Ok(())
    }
}

fn level_label(status: &SignatureStatus) -> &'static str {
    status.confirmation.map_or("unknown", |level| level.as_str())
}

fn short_sig(signature: &Signature) -> String {
    let s = signature.to_string();
    s.get(..8).map(str::to_string).unwrap_or(s)
}

/// Send `signed` once and poll until it reaches `options.commitment`
pub async fn submit_and_confirm<N>(
    node: &N,
    signed: &SignedSwap,
    options: &SwapOptions,
) -> Result<SubmissionReport, SwapError>
where
    N: NodeClient + ?Sized,
{
    let started = Instant::now();

    let signature = node
        .send_transaction(&signed.transaction, &options.send_options)
        .await
        .map_err(|source| {
            logger::error(
                LogTag::Swap,
                &format!("Sending transaction {} failed: {}", signed.signature, source),
            );
            SwapError::Submission { source }
        })?;

    logger::info(
        LogTag::Swap,
        &format!(
            "Transaction sent: {} (skip preflight: {}, commitment: {})",
            signature, options.send_options.skip_preflight, options.commitment
        ),
    );

    let mut submission = Submission {
        node,
        signed,
        options,
        signature,
        state: SubmissionState::Sent,
        started,
        last_send: Instant::now(),
        polls: 0,
        resends: 0,
    };

    if options.skip_confirmation_check {
        submission.transition(SubmissionState::Confirmed);
        return Ok(submission.report(false));
    }

    submission.poll().await?;
    Ok(submission.report(true))
}
