//! Classification prompt construction.
//!
//! The system instruction is a fixed template with three worked examples.
//! It carries a `{json_schema}` placeholder that the classifier fills in with
//! the schema of [`BookClassification`] when the request is sent.

use crate::models::{BookClassification, Conversation, MetadataSummary};

/// Placeholder replaced by the output schema at call time.
pub const SCHEMA_PLACEHOLDER: &str = "{json_schema}";

/// System instruction for the classification task.
pub const SYSTEM_PROMPT: &str = r#"
You are sorting eBooks (PDF, EPUB, etc.) into a series of folders describing their category, such as Computer Science, Social Sciences, Writing, Classics, Design, etc. Each folder can have subfolders describing subcategories, such as Computer Science/Algorithms, Social Sciences/Classics, Mathematics/Calculus & Analysis, etc. Books can also be classified by a single category if they are a general-topic book. 

You are also needed to specify the book's title and a comma-separated list of the surnames of the author(s) of the book. If the book has an edition, set "has_edition" to true and write the number of the edition. If the book has no edition, set "has_edition" to false and write -1 as the number of the edition.

For example:
Filename: Clifford Stein_ Thomas H. Cormen_ Ronald L. Rivest_ Charles Eric Leiserson - Introduction to algorithms (2022).pdf
Name: Introduction to Algorithms
Author: Cormen, Leiserson, Rivest, Stein
has_edition: True
edition: 4
Folder: Computer Science/Theoretical Computer Science/Algorithms & Data Structures

Filename: Crafting Interpreters by Robert Nystrom (z-lib.org).pdf
Name: Crafting Interpreters
Author: Nystrom
has_edition: False
edition: -1
Folder: Computer Science/Theoretical Computer Science/Programming Languages & Compilers

Filename: Principles of Modern Chemistry, 7e (Oxtoby, Gillis, Campion)
Name: Principles of Modern Chemistry
Author: Oxtoby, Gillis, Campion
has_edition: True
edition: 7
Folder: Chemistry

Given the filename of a book and its metadata, return the book's title, author surnames, category, and edition information.

Respond with the following JSON schema:

{json_schema}
"#;

/// Build the system + user conversation for a metadata summary.
///
/// The summary text is used verbatim as the user message.
pub fn build(summary: &MetadataSummary) -> Conversation {
    Conversation::new(SYSTEM_PROMPT, summary.to_message())
}

/// Substitute the output schema into a system instruction.
pub fn render_system_prompt(template: &str) -> String {
    let schema = format!("{:#}", BookClassification::json_schema());
    template.replace(SCHEMA_PLACEHOLDER, &schema)
}
