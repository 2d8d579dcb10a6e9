use std::io::{IsTerminal as _, Write as _};

use anyhow::Context as _;
use mapx_core::{GroundingBackend, LocationState, LocationStatus, QueryController, SubmitRejected};
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tokio::sync::watch;

use crate::display;

/// Runs one query and prints the outcome.
///
/// Unlike the interactive session, a one-shot query waits for the location
/// read to settle first; the read is bounded by its own timeout.
pub(crate) async fn ask<B: GroundingBackend>(
    controller: &QueryController<B>,
    mut location: watch::Receiver<LocationState>,
    locating: bool,
    prompt: &str,
    json: bool,
) -> anyhow::Result<()> {
    if locating && location.wait_for(LocationState::is_settled).await.is_err() {
        tracing::debug!("location task ended before settling");
    }
    if !json {
        print_lines(&display::location_update(
            &location.borrow(),
            LocationStatus::Idle,
        ));
        println!("{}", display::LOADING_MESSAGE);
    }

    match controller.submit(prompt).await {
        Ok(_) | Err(SubmitRejected::Busy) => {}
        Err(SubmitRejected::Invalid(err)) => anyhow::bail!(err),
    }

    let state = controller.state();
    if let Some(message) = state.error_message() {
        anyhow::bail!(message.to_string());
    }

    if json {
        let result = state.result().context("query finished without a result")?;
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", display::format_outcome(&state, std::io::stdout().is_terminal()));
    }
    Ok(())
}

/// Reads one prompt per line from stdin until EOF or `exit`.
pub(crate) async fn interactive<B: GroundingBackend>(
    controller: &QueryController<B>,
    location: &watch::Receiver<LocationState>,
) -> anyhow::Result<()> {
    let styled = std::io::stdout().is_terminal();
    let mut shown = LocationStatus::Idle;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Ask Gemini about places! Type `exit` or press Ctrl-D to quit.");

    loop {
        {
            let current = location.borrow();
            print_lines(&display::location_update(&current, shown));
            shown = current.status();
        }

        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }

        if controller.state().can_submit(&line) {
            println!("{}", display::LOADING_MESSAGE);
        }
        match controller.submit(&line).await {
            Ok(_) => print!("{}", display::format_outcome(&controller.state(), styled)),
            Err(SubmitRejected::Invalid(err)) => println!("{err}"),
            Err(SubmitRejected::Busy) => {}
        }
    }

    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
