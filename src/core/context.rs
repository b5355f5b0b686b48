use crate::domain::model::SearchResults;

pub const NO_RESULTS: &str = "No search results.";

pub const SYSTEM_PROMPT: &str = "You are a research assistant that answers questions using web search results. \
Answer the user's question directly and concisely. Base the answer on the numbered sources you are given \
and cite them inline as [n]. If the sources do not contain the answer, say so and answer from general \
knowledge, making clear which parts are not backed by a source.";

/// 截斷到 max_chars 個字元，不切斷多位元組字元
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// 將搜尋結果整理成帶編號的來源清單
pub fn format_sources(results: &SearchResults, snippet_max_chars: usize) -> String {
    let mut s = String::new();

    if let Some(answer) = &results.answer_box {
        s.push_str(&format!("Answer box: {}\n", answer.replace('\n', " ")));
    }
    if let Some(graph) = &results.knowledge_graph {
        s.push_str(&format!("Knowledge graph: {}\n", graph.replace('\n', " ")));
    }
    if !s.is_empty() && !results.hits.is_empty() {
        s.push('\n');
    }

    for (i, hit) in results.hits.iter().enumerate() {
        let title = if hit.title.trim().is_empty() {
            "(no title)"
        } else {
            hit.title.trim()
        };
        s.push_str(&format!("[{}] {}\n  URL: {}\n", i + 1, title, hit.link));

        let snippet = hit.snippet.trim();
        if !snippet.is_empty() {
            s.push_str(&format!(
                "  {}\n",
                truncate_chars(snippet, snippet_max_chars).replace('\n', " ")
            ));
        }
        s.push('\n');
    }

    if s.is_empty() {
        s = NO_RESULTS.to_string();
    }
    s.trim_end().to_string()
}

pub fn user_prompt(query: &str, sources: &str) -> String {
    format!("Question: {}\n\nSources:\n{}", query.trim(), sources)
}
