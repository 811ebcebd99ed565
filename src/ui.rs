use crate::release::CurrentVersion;
use crate::version::{ChangeClass, Version};

pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message); // Red color
}

pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message); // Green color
}

pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message); // Yellow color
}

pub fn display_warning(message: &str) {
    println!("\x1b[33mWARNING:\x1b[0m {}", message);
}

pub fn display_current_version(current: &CurrentVersion) {
    match current {
        CurrentVersion::NoPriorRelease => {
            display_status("No prior release found, starting from 0.0.0");
        }
        CurrentVersion::Released { tag, version } => {
            display_status(&format!("Current version: {} (tag '{}')", version, tag));
        }
        CurrentVersion::UnparsableTag { tag } => {
            display_warning(&format!(
                "Latest tag '{}' is not a semantic version, treating current version as 0.0.0",
                tag
            ));
        }
    }
}

pub fn display_commit_analysis(commit_messages: &[String]) {
    println!("\n\x1b[1mCommits since last release:\x1b[0m {}", commit_messages.len());

    for (i, message) in commit_messages.iter().take(10).enumerate() {
        let subject = message.lines().next().unwrap_or("");
        println!("  {}. {}", i + 1, truncate_subject(subject, 60));
    }

    if commit_messages.len() > 10 {
        println!("  ... and {} more commits", commit_messages.len() - 10);
    }
}

/// Truncates a subject line to at most `max_chars` characters.
///
/// Cuts on a character boundary, so multi-byte subjects never split
/// mid-character.
fn truncate_subject(subject: &str, max_chars: usize) -> &str {
    match subject.char_indices().nth(max_chars) {
        Some((index, _)) => &subject[..index],
        None => subject,
    }
}

pub fn display_release_plan(class: ChangeClass, current: Version, next: Version) {
    display_status(&format!("Detected bump type: {}", class));
    println!("\n\x1b[1mProposed Release:\x1b[0m");
    println!("  From: \x1b[31m{}\x1b[0m", current);
    println!("  To:   \x1b[32m{}\x1b[0m", next);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_subject_short_input_untouched() {
        assert_eq!(truncate_subject("fix: null check", 60), "fix: null check");
    }

    #[test]
    fn test_truncate_subject_cuts_at_char_count() {
        let subject = "a".repeat(80);
        assert_eq!(truncate_subject(&subject, 60).chars().count(), 60);
    }

    #[test]
    fn test_truncate_subject_multibyte_boundary() {
        // Long enough that the cut lands inside the CJK run
        let subject = format!("feat: 为虎码秃版加词器增加拼音反查与编码候选的批量导入支持 {}", "词".repeat(40));
        let truncated = truncate_subject(&subject, 60);
        assert_eq!(truncated.chars().count(), 60);
        assert!(subject.starts_with(truncated));
    }

    #[test]
    fn test_display_commit_analysis_handles_multibyte_subjects() {
        // Must not panic on non-ASCII subjects longer than the display cutoff
        let messages = vec![format!("feat: 加词器{}\n\n正文说明", "码".repeat(70))];
        display_commit_analysis(&messages);
    }
}
