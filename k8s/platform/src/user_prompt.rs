use crate::common::error::{PromptAborted, ReadingStdin, Result, WritingStdout};
use snafu::{ensure, ResultExt};
use std::io::{BufRead, Write};

/// Asks the operator to merge the version bump before it's tagged.
pub const MERGE_PULL_REQUEST: &str =
    "Please get the pull request approved and merged, then hit ENTER to continue";

/// Prints the prompt and blocks until the operator enters a line. End of input is not a
/// confirmation and fails.
pub fn wait_for_confirmation<R>(prompt: &str, mut input: R) -> Result<()>
where
    R: BufRead,
{
    let mut stdout = std::io::stdout();
    write!(stdout, "{prompt}").context(WritingStdout)?;
    stdout.flush().context(WritingStdout)?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context(ReadingStdin)?;
    ensure!(read > 0, PromptAborted { prompt });

    Ok(())
}
