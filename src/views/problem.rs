use serde::Serialize;

use crate::observability::metrics::get_metrics;
use crate::router::View;
use crate::views::{escape_html, PROBLEM_VIEW};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub description: &'static str,
    pub code: &'static str,
    /// canonical replacement for `__`
    pub solution: &'static str,
}

pub static PROBLEMS: &[Problem] = &[
    Problem {
        description: "What is truth?",
        code: "function problem () { return __; }",
        solution: "true",
    },
    Problem {
        description: "Simple Math",
        code: "function problem () { return 42 === 6 * __; }",
        solution: "7",
    },
];

/// Problems are numbered from 1.
pub fn problem(number: usize) -> Option<&'static Problem> {
    number.checked_sub(1).and_then(|index| PROBLEMS.get(index))
}

pub fn problem_view(arg: &str) -> View {
    let title = format!("Problem #{}", arg);
    let body = match arg.parse::<usize>().ok().and_then(problem) {
        Some(found) => format!(
            concat!(
                r#"<p data-name="description">{}</p>"#,
                r#"<pre><code data-name="code">{}</code></pre>"#,
                r#"<form><textarea class="answer"></textarea>"#,
                r#"<button class="check-btn" type="button">Check Answer</button></form>"#,
                r#"<div class="result"></div>"#,
            ),
            escape_html(found.description),
            escape_html(found.code),
        ),
        None => r#"<p data-name="description">This problem does not exist.</p>"#.to_owned(),
    };

    View::new(PROBLEM_VIEW, "problem-view")
        .with_title(title.as_str())
        .with_html(format!(
            r#"<div class="problem-view"><h3 class="title">{}</h3>{}</div>"#,
            escape_html(&title),
            body
        ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub message: String,
    /// fragment of the next problem, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    pub html: String,
}

/// Check `answer` for problem `number`; `None` when the problem does not exist.
pub fn check_answer(number: usize, answer: &str) -> Option<AnswerFeedback> {
    let current = problem(number)?;
    let answer = answer.trim();
    let correct = !answer.is_empty()
        && normalize(&current.code.replace("__", answer))
            == normalize(&current.code.replace("__", current.solution));

    get_metrics()
        .answer_checks
        .with_label_values(&[number.to_string().as_str(), if correct { "correct" } else { "incorrect" }])
        .inc();

    let feedback = if correct {
        let next = problem(number + 1).map(|_| format!("#problem-{}", number + 1));
        let link = match &next {
            Some(href) => format!(r#"<a href="{}">Next Problem</a>"#, href),
            None => r#"<a href="">You're Finished!</a>"#.to_owned(),
        };
        AnswerFeedback {
            correct,
            message: "Correct!".to_owned(),
            next,
            html: format!("<span>Correct!</span> {}", link),
        }
    } else {
        AnswerFeedback {
            correct,
            message: "Incorrect!".to_owned(),
            next: None,
            html: "Incorrect!".to_owned(),
        }
    };
    Some(feedback)
}

/// Drop whitespace except a single space between two identifier characters,
/// so `6*7;` and `6 *  7 ;` compare equal but `returntrue` does not match
/// `return true`.
fn normalize(code: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_' || c == '$';
    let mut normalized = String::with_capacity(code.len());
    let mut pending_space = false;
    for c in code.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && is_word(c) && normalized.chars().next_back().is_some_and(is_word) {
            normalized.push(' ');
        }
        pending_space = false;
        normalized.push(c);
    }
    normalized
}
