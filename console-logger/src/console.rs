use nu_ansi_term::{Color::Green, Style};

/// Print a progress banner for a unit of work, e.g. "Releasing identity ...".
pub fn banner(verb: &str, subject: &str) {
    println!("{} {} ...", Green.bold().paint(verb), subject);
}

/// Print a stage heading within a unit of work.
pub fn stage(message: &str) {
    println!("{} ...", Style::new().bold().paint(message));
}
