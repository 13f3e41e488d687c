//! System prompt construction for the SQL agent.

use crate::db::SchemaMap;

/// Builds the system prompt, embedding the schema snapshot so the model
/// can usually answer without re-discovering tables.
pub fn build_system_prompt(schema: &SchemaMap) -> String {
    let mut prompt = String::from(
        "You are a helpful assistant that answers questions about a MySQL database.\n\
         \n\
         You have tools to list tables, describe a table, and execute read-only \
         SQL queries. Use them to look up whatever the question needs, then answer \
         in plain language. Do not show raw SQL or row dumps unless the user asks \
         for them.\n\
         \n\
         Rules:\n\
         - Only read data. INSERT, UPDATE, DELETE, DDL and other writes will be refused.\n\
         - If a query fails, adjust it rather than guessing at the answer.\n\
         - If the database cannot answer the question, say so plainly.\n",
    );

    if !schema.is_empty() {
        prompt.push_str("\nThe database schema is:\n\n");
        prompt.push_str(&schema.format_for_llm());
    } else {
        prompt.push_str(
            "\nNo schema snapshot is available. Use the list_tables and \
             describe_table tools to discover the schema.\n",
        );
    }

    prompt
}
