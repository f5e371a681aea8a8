use crate::preview::{PreviewModel, SectionBody};

impl PreviewModel {
    /// Renders the preview as a markdown document.
    pub fn render_markdown(&self) -> String {
        let mut md = String::new();

        if let Some(header) = &self.header {
            md.push_str(&format!("# {}\n", header.full_name));
            if !header.contact.is_empty() {
                md.push_str(&header.contact.join(" | "));
                md.push('\n');
            }
            md.push('\n');
        }

        for section in &self.sections {
            md.push_str(&format!("## {}\n\n", section.heading));
            match &section.body {
                SectionBody::Text(text) => {
                    md.push_str(text);
                    md.push_str("\n\n");
                }
                SectionBody::Badges(badges) => {
                    md.push_str(&badges.join(", "));
                    md.push_str("\n\n");
                }
                SectionBody::Entries(entries) => {
                    for entry in entries {
                        md.push_str(&format!("### {}\n", entry.title));
                        if let Some(subtitle) = &entry.subtitle {
                            md.push_str(&format!("{subtitle}\n"));
                        }
                        if let Some(highlight) = &entry.highlight {
                            md.push_str(&format!("**{highlight}**\n"));
                        }
                        if let Some(dates) = &entry.dates {
                            md.push_str(&format!("_{dates}_\n"));
                        }
                        if let Some(description) = &entry.description {
                            md.push_str(&format!("{description}\n"));
                        }
                        md.push('\n');
                    }
                }
            }
        }
        md
    }
}
