//! Result assembly
//!
//! Turns the settled adapter outcomes of one request into the per-protocol
//! result. Pure: no I/O, no concurrency, same input gives the same output.

use lendpool_types::{
	AdapterOutcome, AggregatedResult, Aggregation, ProtocolName, ProtocolReport, SettledOutcome,
};
use thiserror::Error;

/// Outcomes that do not line up with the registered protocols
///
/// Any of these means the aggregation logic itself is broken.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssemblyError {
	#[error("Protocol {0} is listed more than once")]
	DuplicateProtocol(ProtocolName),

	#[error("No outcome settled for protocol {0}")]
	MissingOutcome(ProtocolName),

	#[error("Protocol {0} settled more than once")]
	DuplicateOutcome(ProtocolName),

	#[error("Outcome settled for unregistered protocol {0}")]
	UnexpectedOutcome(ProtocolName),
}

/// Build the aggregated result with exactly one entry per protocol, in the
/// order of `protocols`
///
/// Successful outcomes contribute their offers verbatim; failures and
/// timeouts contribute an empty sequence.
pub fn assemble(
	protocols: &[ProtocolName],
	outcomes: &[SettledOutcome],
) -> Result<Aggregation, AssemblyError> {
	for (index, protocol) in protocols.iter().enumerate() {
		if protocols[..index].contains(protocol) {
			return Err(AssemblyError::DuplicateProtocol(*protocol));
		}
	}

	if let Some(stray) = outcomes.iter().find(|o| !protocols.contains(&o.protocol)) {
		return Err(AssemblyError::UnexpectedOutcome(stray.protocol));
	}

	let mut pools = AggregatedResult::new();
	let mut reports = Vec::with_capacity(protocols.len());

	for protocol in protocols {
		let mut matching = outcomes.iter().filter(|o| o.protocol == *protocol);
		let settled = matching
			.next()
			.ok_or(AssemblyError::MissingOutcome(*protocol))?;
		if matching.next().is_some() {
			return Err(AssemblyError::DuplicateOutcome(*protocol));
		}

		let offers = match &settled.outcome {
			AdapterOutcome::Success(offers) => offers.clone(),
			AdapterOutcome::Failure(_) => Vec::new(),
		};

		reports.push(ProtocolReport {
			protocol: *protocol,
			status: settled.outcome.status(),
			offers: offers.len(),
			duration_ms: settled.duration_ms,
		});
		pools.push(*protocol, offers);
	}

	Ok(Aggregation { pools, reports })
}
