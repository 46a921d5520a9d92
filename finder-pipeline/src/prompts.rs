//! Prompt text for the two generation stages.

/// Example problem links shown to the model, one per supported platform.
const EXAMPLE_LINKS: &[(&str, &str)] = &[
    ("LeetCode", "https://leetcode.com/problems/two-sum/"),
    (
        "GeeksforGeeks",
        "https://www.geeksforgeeks.org/problems/reverse-a-linked-list/1",
    ),
    (
        "HackerRank",
        "https://www.hackerrank.com/challenges/ctci-array-left-rotation/problem",
    ),
    ("InterviewBit", "https://www.interviewbit.com/problems/kth-smallest-element-in-the-array/"),
    ("CodeChef", "https://www.codechef.com/problems/FLOW001"),
];

/// Stage 1: ask for `{"company", "summary"}` describing the query.
pub fn intent_prompt(query: &str) -> String {
    format!(
        r#"You are helping a candidate prepare for coding interviews.

Analyze the request below and reply with ONLY a JSON object, no prose and no markdown:
{{"company": "<target company, or General if none is named>", "summary": "<one sentence describing the skills and topics to practice>"}}

Request: {query}"#
    )
}

/// Stage 2: ask for exactly five problems as a JSON array.
pub fn generation_prompt(summary: &str, company: &str, batch_size: usize) -> String {
    let examples = EXAMPLE_LINKS
        .iter()
        .map(|(platform, url)| format!("- {platform}: {url}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Recommend exactly {batch_size} real coding practice problems for this preparation goal:
{summary}

Target company: {company}

Reply with ONLY a JSON array of {batch_size} objects, no prose and no markdown. Each object must have these keys:
"url", "platform", "topic", "difficulty_level", "company", "category".

Rules:
- "url" must be a full link to the problem page on its platform.
- "company" must be "{company}" for every object.
- "difficulty_level" is one of Easy, Medium, Hard.

Example links by platform:
{examples}"#
    )
}
