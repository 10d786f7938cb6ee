/// Folder name shared by a project's canonical and secondary destinations.
///
/// `"<context> - <project name>"`, or just the name when the context is blank.
/// Whitespace is collapsed and path separators cannot leak into the name.
pub fn base_folder_name(context: &str, project_name: &str) -> String {
    let name = collapse(&project_name.replace(['/', '\\'], "-"));
    let context = collapse(context);
    if context.is_empty() {
        name
    } else {
        format!("{context} - {name}")
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
