//! Template fill — turns a tailored inventory into a complete LaTeX document.
//!
//! The template is plain text with `___PLACEHOLDER___` markers. Free-text
//! fields are escaped on the way in; section blocks (education, skills,
//! experience, projects) are generated here. Entries without bullets are
//! skipped so an empty `itemize` never reaches the typesetter.

use crate::errors::AppError;
use crate::models::application::Constraints;
use crate::models::inventory::{
    EducationEntry, ExperienceEntry, Inventory, ProjectEntry, SkillGroup,
};
use crate::render::escape::{escape_latex, escape_rich};

const REQUIRED_PLACEHOLDERS: &[&str] = &[
    "___FONT_SIZE___",
    "___ABOUT_NAME___",
    "___ABOUT_EMAIL___",
    "___ABOUT_PHONE___",
    "___ABOUT_LOCATION___",
    "___ABOUT_LINKS___",
    "___EDUCATION_LIST___",
    "___SKILLS_LIST___",
    "___EXPERIENCE_LIST___",
    "___PROJECTS_LIST___",
];

/// Fills every placeholder in `template` from the tailored inventory.
/// Fails with a render error when the template is missing a placeholder.
pub fn fill_template(
    template: &str,
    inventory: &Inventory,
    constraints: &Constraints,
) -> Result<String, AppError> {
    for placeholder in REQUIRED_PLACEHOLDERS {
        if !template.contains(placeholder) {
            return Err(AppError::Render(format!(
                "Template is missing the {placeholder} placeholder"
            )));
        }
    }

    let about = &inventory.about;

    Ok(template
        .replace("___FONT_SIZE___", &constraints.font_size_pt.to_string())
        .replace("___ABOUT_NAME___", &escape_latex(&about.name))
        .replace("___ABOUT_EMAIL___", &escape_latex(&about.email))
        .replace("___ABOUT_PHONE___", &escape_latex(about.phone.as_deref().unwrap_or("")))
        .replace(
            "___ABOUT_LOCATION___",
            &escape_latex(about.location.as_deref().unwrap_or("")),
        )
        .replace("___ABOUT_LINKS___", &links_line(inventory))
        .replace("___EDUCATION_LIST___", &education_block(&inventory.education))
        .replace("___SKILLS_LIST___", &skills_block(&inventory.skills))
        .replace("___EXPERIENCE_LIST___", &experience_block(&inventory.experience))
        .replace("___PROJECTS_LIST___", &projects_block(&inventory.projects)))
}

fn links_line(inventory: &Inventory) -> String {
    let links = &inventory.about.links;
    [&links.github, &links.linkedin, &links.website]
        .iter()
        .filter_map(|l| l.as_deref())
        .map(escape_latex)
        .collect::<Vec<_>>()
        .join(" \\textbar{} ")
}

fn education_block(entries: &[EducationEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "\\noindent \\textbf{{{}}} \\hfill \\textbf{{{}}} \\par\n\
                 \\noindent \\textit{{{}}} \\hfill \\textit{{{}}} \\par\n\
                 \\vspace{{4pt}}",
                escape_latex(&entry.school),
                escape_latex(&entry.dates),
                escape_latex(&entry.degree),
                escape_latex(entry.location.as_deref().unwrap_or("")),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn skills_block(groups: &[SkillGroup]) -> String {
    groups
        .iter()
        .map(|group| {
            let names = group
                .skills
                .iter()
                .map(|s| escape_rich(s))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "\\noindent \\textbf{{{}:}} {} \\par",
                escape_latex(&group.category),
                names
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn experience_block(entries: &[ExperienceEntry]) -> String {
    entries
        .iter()
        .filter(|job| !job.bullets.is_empty())
        .map(|job| {
            format!(
                "\\noindent \\textbf{{{}}} \\hfill \\textbf{{{}}} \\par\n\
                 \\noindent \\textit{{{}}} \\hfill \\textit{{{}}} \\par\n\
                 {}\\begin{{itemize}}\n{}\n\\end{{itemize}}\n\\vspace{{4pt}}",
                escape_latex(&job.company),
                escape_latex(&job.dates),
                escape_latex(&job.role),
                escape_latex(job.location.as_deref().unwrap_or("")),
                tech_line(&job.tech_stack),
                bullet_items(job.bullets.iter().map(|b| b.text.as_str())),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn projects_block(entries: &[ProjectEntry]) -> String {
    entries
        .iter()
        .filter(|project| !project.bullets.is_empty())
        .map(|project| {
            format!(
                "\\noindent \\textbf{{{}}} \\hfill \\textbf{{{}}} \\par\n\
                 \\noindent \\textit{{{}}} \\par\n\
                 {}\\begin{{itemize}}\n{}\n\\end{{itemize}}\n\\vspace{{4pt}}",
                escape_latex(&project.title),
                escape_latex(&project.dates),
                escape_latex(project.role.as_deref().unwrap_or("")),
                tech_line(&project.tech_stack),
                bullet_items(project.bullets.iter().map(|b| b.text.as_str())),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn tech_line(tech_stack: &[String]) -> String {
    if tech_stack.is_empty() {
        return String::new();
    }
    let names = tech_stack
        .iter()
        .map(|t| escape_rich(t))
        .collect::<Vec<_>>()
        .join(", ");
    format!("\\noindent \\texttt{{{names}}} \\par\n")
}

fn bullet_items<'a>(texts: impl Iterator<Item = &'a str>) -> String {
    texts
        .map(|text| format!("\\item {}", escape_rich(text)))
        .collect::<Vec<_>>()
        .join("\n")
}
