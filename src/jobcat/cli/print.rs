use chrono::{DateTime, Utc};
use colored::Colorize;
use jobcat::api::{CmdMessage, MessageLevel};
use jobcat::catalog::CatalogStats;
use jobcat::model::Job;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 10;
const TIME_WIDTH: usize = 16;
const REMOTE_MARKER: &str = "⌂";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub(super) fn print_jobs(jobs: &[Job]) {
    if jobs.is_empty() {
        println!("No jobs found.");
        return;
    }

    for job in jobs {
        let id = truncate_to_width(&job.id, ID_WIDTH);
        let id_padded = format!("{:<width$} ", id, width = ID_WIDTH);

        let marker = if job.remote {
            format!("{} ", REMOTE_MARKER)
        } else {
            "  ".to_string()
        };

        let time_ago = format_time_ago(job.updated_at);

        let summary = format!("{} · {} · {}", job.title, job.company, job.location);
        let fixed_width = id_padded.width() + marker.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let summary_display = truncate_to_width(&summary, available);
        let padding = available.saturating_sub(summary_display.width());

        let id_colored = if job.is_local() {
            id_padded.yellow()
        } else {
            id_padded.normal()
        };

        println!(
            "{}{}{}{}{}",
            id_colored,
            marker.cyan(),
            summary_display,
            " ".repeat(padding),
            time_ago.dimmed()
        );
    }
}

pub(super) fn print_job(job: &Job) {
    println!("{}", job.title.bold());
    println!("{} · {}", job.company, job.location);
    println!("--------------------------------");
    println!("{:<12} {}", "Id:", job.id);
    println!("{:<12} {:?}", "Source:", job.provenance);
    println!("{:<12} {}", "Type:", job.job_type);
    println!("{:<12} {}", "Experience:", job.experience);
    println!("{:<12} {}", "Salary:", job.salary);
    println!("{:<12} {}", "Remote:", if job.remote { "yes" } else { "no" });
    println!("{:<12} {}", "Posted:", job.posted);
    println!("{:<12} {}", "Apply:", job.apply_url);
    if !job.skills.is_empty() {
        println!("{:<12} {}", "Skills:", job.skills.join(", "));
    }
    println!();
    println!("{}", job.description);
    if !job.requirements.is_empty() {
        println!();
        println!("{}", "Requirements".bold());
        for req in &job.requirements {
            println!("  - {}", req);
        }
    }
}

pub(super) fn print_stats(stats: &CatalogStats) {
    let rows = [
        ("Total jobs", stats.total),
        ("From provider", stats.external_count),
        ("Added by admin", stats.local_count),
        ("Remote", stats.remote_count),
        ("Companies", stats.distinct_organizations),
        ("Locations", stats.distinct_locations),
    ];
    for (label, value) in rows {
        println!("{:<16} {}", label, value.to_string().bold());
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
