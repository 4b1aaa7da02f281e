use std::io::{self, BufRead, Write};

pub const TAG_FILTER_PROMPT: &str = "Enter tags to filter (comma separated):";

/// Prints `message` and reads one line. End of input is a cancel (`None`).
pub fn prompt_line<R, W>(input: &mut R, output: &mut W, message: &str) -> io::Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn reads_one_line_without_newline() {
        let mut input = Cursor::new("work, home\nignored\n");
        let mut output = Vec::new();
        let answer = prompt_line(&mut input, &mut output, TAG_FILTER_PROMPT).expect("prompt");
        assert_eq!(answer.as_deref(), Some("work, home"));
        assert_eq!(
            String::from_utf8(output).expect("utf8"),
            format!("{TAG_FILTER_PROMPT}\n")
        );
    }

    #[test]
    fn empty_line_is_an_answer() {
        let mut input = Cursor::new("\r\n");
        let answer = prompt_line(&mut input, &mut Vec::new(), "?").expect("prompt");
        assert_eq!(answer.as_deref(), Some(""));
    }

    #[test]
    fn end_of_input_is_cancel() {
        let mut input = Cursor::new("");
        let answer = prompt_line(&mut input, &mut Vec::new(), "?").expect("prompt");
        assert_eq!(answer, None);
    }
}
