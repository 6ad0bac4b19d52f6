//! Writes a scrape session as newline delimited JSON.
use std::future::Future;
use std::io;

use futures::StreamExt;
use serde::Serialize;
use tracing::info;

use super::printer::Printer;
use crate::core::session::{SeedInfoStream, SessionReport};

/// The last line of the output.
#[derive(Serialize, Debug)]
struct Done {
    done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Why the output loop ended.
enum End {
    Exhausted,
    Stopped,
    ReaderGone,
}

/// Prints each result as soon as the session yields it, then the terminal
/// marker.
///
/// When `stop` resolves first, or the reader of the output goes away, the
/// session is dropped right away, cancelling the requests in flight.
/// Neither is an error and the report so far is returned. There is nobody
/// to print the marker for when the reader is gone, so it is skipped.
///
/// # Errors
///
/// Will return an error if every tracker failed, in which case the marker
/// carries the same error, or if the output can't be written.
pub async fn stream_ndjson<P, F>(printer: &P, mut session: SeedInfoStream, stop: F) -> anyhow::Result<SessionReport>
where
    P: Printer,
    F: Future<Output = ()>,
{
    tokio::pin!(stop);

    let end = loop {
        tokio::select! {
            next = session.next() => match next {
                Some(result) => match printer.println(&serde_json::to_string(&result)?) {
                    Ok(()) => {}
                    Err(err) if reader_gone(&err) => break End::ReaderGone,
                    Err(err) => return Err(err.into()),
                },
                None => break End::Exhausted,
            },
            () = &mut stop => break End::Stopped,
        }
    };

    let outcome = match end {
        End::Exhausted => session.outcome(),
        End::Stopped => {
            let report = session.report().clone();
            drop(session);

            info!("scrape session cancelled");
            Ok(report)
        }
        End::ReaderGone => {
            let report = session.report().clone();
            drop(session);

            info!("output closed, scrape session cancelled");
            return Ok(report);
        }
    };

    let done = Done {
        done: true,
        error: outcome.as_ref().err().map(ToString::to_string),
    };

    if let Err(err) = printer.println(&serde_json::to_string(&done)?) {
        if !reader_gone(&err) {
            return Err(err.into());
        }
    }

    outcome.map_err(Into::into)
}

fn reader_gone(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::BrokenPipe
}
