use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref RE: Regex = Regex::new(r"[\p{L}\p{N}]{2,}").expect("valid regex");
    pub static ref ENGLISH_STOP_WORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "i","me","my","myself","we","our","ours","ourselves","you","your","yours",
            "yourself","yourselves","he","him","his","himself","she","her","hers","herself",
            "it","its","itself","they","them","their","theirs","themselves","what","which",
            "who","whom","this","that","these","those","am","is","are","was","were","be",
            "been","being","have","has","had","having","do","does","did","doing","a","an",
            "the","and","but","if","or","because","as","until","while","of","at","by","for",
            "with","about","against","between","into","through","during","before","after",
            "above","below","to","from","up","down","in","out","on","off","over","under",
            "again","further","then","once","here","there","when","where","why","how","all",
            "any","both","each","few","more","most","other","some","such","no","nor","not",
            "only","own","same","so","than","too","very","s","t","can","will","just","don",
            "should","now","d","ll","m","o","re","ve","y","ain","aren","couldn","didn",
            "doesn","hadn","hasn","haven","isn","ma","mightn","mustn","needn","shan","shouldn",
            "wasn","weren","won","wouldn"
        ];
        words.iter().copied().collect()
    };
}

/// Tokenize text into lowercase terms of at least two letters/digits, in order of
/// occurrence, dropping anything in `stop_words`. Documents and queries go through
/// the same function so they land in the same term space.
pub fn tokenize(text: &str, stop_words: &HashSet<&'static str>) -> Vec<String> {
    let lowered = text.to_lowercase();
    RE.find_iter(&lowered)
        .map(|mat| mat.as_str())
        .filter(|token| !stop_words.contains(*token))
        .map(str::to_string)
        .collect()
}
