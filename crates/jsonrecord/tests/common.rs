#![allow(dead_code)]

// Two newline-delimited records, cut at token seams: inside strings,
// inside numbers and literals, and between
// the closing brace of one record and the opening brace of the next.
#[rustfmt::skip]
pub const STREAM: [&str; 14] = [
    r#"{"id":"r1","ti"#,                                         // inside a key
    r#"tle":"Moby-"#,                                           // inside a value
    r#"Dick","authors":[{"name":"Melville","born":18"#,         // inside a number
    r#"19}],"tags":["novel","#,                                 // after an element separator
    r#""sea"],"read":tr"#,                                      // inside a literal
    r#"ue,"rating":4.5,"#,
    r#""notes":null"#,                                          // literal ended by the next chunk
    r#"}"#,
    "\n",
    r#"{"id":"r2","title":"Ulysses","authors":[]"#,
    r#","tags":[["nested"]],"#,
    r#""read":false,"#,
    r#""quote":"\"yes\" é\ud83d"#,                         // between surrogate halves
    r#"\ude00"}"#,
];

pub fn joined() -> String {
    STREAM.concat()
}
