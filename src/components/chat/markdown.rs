//! Line-oriented block structure for assistant responses.
//!
//! Responses are interpreted line by line: a fence marker opens a code block
//! that runs until the matching closing fence (or the end of the text), runs
//! of `<number>. ` lines group into one ordered list, and every other
//! non-blank line is a paragraph of its own.

/// A rendered block of an assistant response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
	/// Fenced code with its info string (may be empty).
	Code {
		/// Language hint from the opening fence.
		language: String,
		/// Code body, without the fence markers.
		text: String,
	},
	/// A run of consecutive ordinal lines, markers stripped.
	OrderedList(Vec<String>),
	/// A plain line of prose.
	Paragraph(String),
}

const FENCE: &str = "```";

/// Split response text into renderable blocks.
pub fn parse_blocks(text: &str) -> Vec<Block> {
	let mut blocks = Vec::new();
	let mut list: Vec<String> = Vec::new();
	let mut code: Option<(String, Vec<String>)> = None;

	for line in text.lines() {
		if let Some((language, body)) = code.as_mut() {
			if line.trim_end().starts_with(FENCE) {
				blocks.push(Block::Code {
					language: std::mem::take(language),
					text: body.join("\n"),
				});
				code = None;
			} else {
				body.push(line.to_string());
			}
			continue;
		}

		if let Some(rest) = line.trim_end().strip_prefix(FENCE) {
			flush_list(&mut list, &mut blocks);
			code = Some((rest.trim().to_string(), Vec::new()));
			continue;
		}

		if let Some(item) = ordinal_item(line) {
			list.push(item.to_string());
			continue;
		}
		flush_list(&mut list, &mut blocks);

		if !line.trim().is_empty() {
			blocks.push(Block::Paragraph(line.to_string()));
		}
	}

	flush_list(&mut list, &mut blocks);

	// An unclosed fence still renders as code to the end of the text.
	if let Some((language, body)) = code {
		blocks.push(Block::Code {
			language,
			text: body.join("\n"),
		});
	}

	blocks
}

fn flush_list(list: &mut Vec<String>, blocks: &mut Vec<Block>) {
	if !list.is_empty() {
		blocks.push(Block::OrderedList(std::mem::take(list)));
	}
}

/// Item text of a `<number>. ` line, or `None` if the line is not one.
fn ordinal_item(line: &str) -> Option<&str> {
	let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
	if digits == 0 {
		return None;
	}
	line[digits..].strip_prefix(". ")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn plain_lines_become_paragraphs() {
		let blocks = parse_blocks("first line\n\nsecond line");
		assert_eq!(
			blocks,
			vec![
				Block::Paragraph("first line".into()),
				Block::Paragraph("second line".into()),
			]
		);
	}

	#[test]
	fn fenced_code_keeps_language_and_body() {
		let blocks = parse_blocks("intro\n```python\ndef f():\n    return 1\n```\noutro");
		assert_eq!(
			blocks,
			vec![
				Block::Paragraph("intro".into()),
				Block::Code {
					language: "python".into(),
					text: "def f():\n    return 1".into(),
				},
				Block::Paragraph("outro".into()),
			]
		);
	}

	#[test]
	fn unclosed_fence_runs_to_the_end() {
		let blocks = parse_blocks("```rust\nfn main() {}");
		assert_eq!(
			blocks,
			vec![Block::Code {
				language: "rust".into(),
				text: "fn main() {}".into(),
			}]
		);
	}

	#[test]
	fn adjacent_ordinal_lines_group_into_one_list() {
		let blocks = parse_blocks("Steps:\n1. clone\n2. build\n3. run\ndone");
		assert_eq!(
			blocks,
			vec![
				Block::Paragraph("Steps:".into()),
				Block::OrderedList(vec!["clone".into(), "build".into(), "run".into()]),
				Block::Paragraph("done".into()),
			]
		);
	}

	#[test]
	fn separated_ordinal_runs_stay_separate_lists() {
		let blocks = parse_blocks("1. one\ntext\n2. two");
		assert_eq!(
			blocks,
			vec![
				Block::OrderedList(vec!["one".into()]),
				Block::Paragraph("text".into()),
				Block::OrderedList(vec!["two".into()]),
			]
		);
	}

	#[test]
	fn ordinal_marker_requires_number_dot_space() {
		assert_eq!(ordinal_item("12. item"), Some("item"));
		assert_eq!(ordinal_item("1.no space"), None);
		assert_eq!(ordinal_item(". item"), None);
		assert_eq!(ordinal_item("v1. item"), None);
	}

	#[test]
	fn ordinal_lines_inside_code_stay_code() {
		let blocks = parse_blocks("```\n1. not a list\n```");
		assert_eq!(
			blocks,
			vec![Block::Code {
				language: String::new(),
				text: "1. not a list".into(),
			}]
		);
	}

	#[test]
	fn empty_input_yields_no_blocks() {
		assert!(parse_blocks("").is_empty());
		assert!(parse_blocks("\n\n").is_empty());
	}
}
