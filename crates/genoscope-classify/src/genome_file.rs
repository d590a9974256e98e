// SPDX-License-Identifier: Apache-2.0

/// Split FASTA-like text into its nucleotide records.
///
/// A line starting with `>` flushes the accumulated sequence (when non-empty)
/// and starts a new record; the header text itself is discarded. Every other
/// line is trimmed and concatenated into the current record. Whatever is
/// still accumulated at end of input flushes exactly once, so header-less
/// files yield one record and empty files yield none.
#[must_use]
pub fn split_sequences(content: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut current = String::new();
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('>') {
            if !current.is_empty() {
                records.push(std::mem::take(&mut current));
            }
        } else {
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        records.push(current);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_headers_yield_two_records_in_order() {
        assert_eq!(split_sequences(">a\nACGT\n>b\nTTTT"), ["ACGT", "TTTT"]);
    }

    #[test]
    fn headerless_content_is_one_record() {
        assert_eq!(split_sequences("ACGTACGT"), ["ACGTACGT"]);
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(split_sequences("").is_empty());
        assert!(split_sequences(">only headers\n>here").is_empty());
    }

    #[test]
    fn multi_line_records_are_concatenated_trimmed() {
        assert_eq!(
            split_sequences(">x\n  ACGT  \nTTTT\n\n>y\nGG"),
            ["ACGTTTTT", "GG"]
        );
    }

    #[test]
    fn trailing_record_without_newline_is_flushed() {
        assert_eq!(split_sequences(">x\nACGT\n>y\nTT"), ["ACGT", "TT"]);
    }
}
