// Scheduled mode switches via cron
//
// A scheduled task is data: an argv list, a fire time, and an
// identifying tag. Rendering to a crontab line happens in exactly one
// place with quoting; user input is never concatenated into a shell
// string. Installation goes through the `crontab` binary.

use std::io::Write;
use std::process::{Command, Stdio};

use chrono::{Days, NaiveDateTime, NaiveTime, Timelike};

use crate::error::CoreError;

/// Parse an `HH:MM` wall-clock time.
pub fn parse_hhmm(input: &str) -> Result<NaiveTime, CoreError> {
    NaiveTime::parse_from_str(input, "%H:%M").map_err(|_| CoreError::ValidationFailed {
        message: format!("'{input}' is not a valid HH:MM time (00:00 - 23:59)"),
    })
}

/// The next occurrence of `at` strictly after `now` (today if still
/// ahead, otherwise tomorrow).
pub fn next_run(now: NaiveDateTime, at: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(at);
    if now.time() < at {
        today
    } else {
        today + Days::new(1)
    }
}

/// One crontab entry: schedule fields plus the command as an argv list.
#[derive(Debug, Clone)]
pub struct CrontabEntry {
    /// Concrete fire time; rendered as minute/hour/day/month fields so
    /// the job runs exactly once.
    pub run_at: NaiveDateTime,
    pub argv: Vec<String>,
    /// Ownership tag appended as a trailing comment; removal filters on it.
    pub tag: String,
}

impl CrontabEntry {
    /// Render the crontab line. Arguments are shell-quoted individually.
    pub fn render(&self) -> String {
        let command: Vec<String> = self.argv.iter().map(|a| shell_quote(a)).collect();
        format!(
            "{} {} {} {} * {} # {}",
            self.run_at.time().minute(),
            self.run_at.time().hour(),
            chrono::Datelike::day(&self.run_at.date()),
            chrono::Datelike::month(&self.run_at.date()),
            command.join(" "),
            self.tag,
        )
    }
}

fn shell_quote(arg: &str) -> String {
    let safe = arg
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b"_@%+=:,./-".contains(&b));
    if safe && !arg.is_empty() {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Drop every line carrying `# {tag}`; returns the remainder and the
/// number of removed lines.
fn filter_tagged(content: &str, tag: &str) -> (String, usize) {
    let marker = format!("# {tag}");
    let mut kept = Vec::new();
    let mut removed = 0;
    for line in content.lines() {
        if line.trim_end().ends_with(&marker) {
            removed += 1;
        } else {
            kept.push(line);
        }
    }
    let mut out = kept.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    (out, removed)
}

/// The invoking user's crontab.
pub struct Crontab;

impl Crontab {
    /// Current crontab content; empty when the user has none.
    pub fn read() -> Result<String, CoreError> {
        let output = Command::new("crontab")
            .arg("-l")
            .output()
            .map_err(|e| CoreError::Schedule { message: format!("cannot run crontab: {e}") })?;
        if output.status.success() {
            String::from_utf8(output.stdout)
                .map_err(|_| CoreError::Schedule { message: "crontab is not UTF-8".into() })
        } else {
            // `crontab -l` exits nonzero when no crontab exists yet.
            Ok(String::new())
        }
    }

    fn write(content: &str) -> Result<(), CoreError> {
        let mut child = Command::new("crontab")
            .arg("-")
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| CoreError::Schedule { message: format!("cannot run crontab: {e}") })?;
        if let Some(stdin) = child.stdin.as_mut() {
            stdin
                .write_all(content.as_bytes())
                .map_err(|e| CoreError::Schedule { message: format!("crontab write: {e}") })?;
        }
        let status = child
            .wait()
            .map_err(|e| CoreError::Schedule { message: format!("crontab wait: {e}") })?;
        if !status.success() {
            return Err(CoreError::Schedule {
                message: format!("crontab rejected the new table ({status})"),
            });
        }
        Ok(())
    }

    /// Append an entry to the user's crontab.
    pub fn install(entry: &CrontabEntry) -> Result<(), CoreError> {
        let mut content = Self::read()?;
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(&entry.render());
        content.push('\n');
        Self::write(&content)
    }

    /// Remove all entries carrying `tag`; returns how many were removed.
    pub fn remove(tag: &str) -> Result<usize, CoreError> {
        let content = Self::read()?;
        let (remainder, removed) = filter_tagged(&content, tag);
        if removed > 0 {
            Self::write(&remainder)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(h, mi, 0))
            .expect("valid datetime")
    }

    #[test]
    fn hhmm_parsing() {
        assert_eq!(parse_hhmm("07:30").expect("valid").hour(), 7);
        assert_eq!(parse_hhmm("23:59").expect("valid").minute(), 59);
        assert!(parse_hhmm("24:00").is_err());
        assert!(parse_hhmm("7h30").is_err());
        assert!(parse_hhmm("").is_err());
    }

    #[test]
    fn next_run_rolls_to_tomorrow_when_past() {
        let now = dt(2026, 8, 24, 12, 0);
        let morning = parse_hhmm("08:00").expect("time");
        let evening = parse_hhmm("20:00").expect("time");

        assert_eq!(next_run(now, evening), dt(2026, 8, 24, 20, 0));
        assert_eq!(next_run(now, morning), dt(2026, 8, 25, 8, 0));
    }

    #[test]
    fn render_quotes_unsafe_arguments() {
        let entry = CrontabEntry {
            run_at: dt(2026, 8, 24, 20, 0),
            argv: vec![
                "/usr/local/bin/gigactl".into(),
                "-p".into(),
                "pass word".into(),
                "mode".into(),
                "away".into(),
            ],
            tag: "gigactl-cron".into(),
        };
        let line = entry.render();
        assert!(line.starts_with("0 20 24 8 * "));
        assert!(line.contains("'pass word'"));
        assert!(line.ends_with("# gigactl-cron"));
    }

    #[test]
    fn filter_tagged_keeps_foreign_lines() {
        let content = "0 1 * * * /bin/backup\n0 20 24 8 * gigactl mode away # gigactl-cron\n";
        let (rest, removed) = filter_tagged(content, "gigactl-cron");
        assert_eq!(removed, 1);
        assert_eq!(rest, "0 1 * * * /bin/backup\n");

        let (unchanged, zero) = filter_tagged(&rest, "gigactl-cron");
        assert_eq!(zero, 0);
        assert_eq!(unchanged, rest);
    }
}
