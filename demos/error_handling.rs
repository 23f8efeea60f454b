//! Demonstrate error handling for invalid Bugs programs.

fn main() {
    // Missing end of line after a do statement's arguments
    match bugs_recognizer::check("Bug b {\n\tdo rue (5), (bar, x+3)\n}\n") {
        Ok(()) => println!("Recognized (unexpected)"),
        Err(bugs_recognizer::Error::Syntax(e)) => {
            println!("Syntax error: {e}");
            println!("  Production: {:?}", e.production);
            println!("  Line: {}", e.line);
            println!("  Message: {}", e.message());
        }
        Err(e) => println!("Rejected: {e}"),
    }

    println!();

    // A valid program followed by stray input
    match bugs_recognizer::check("Bug b {\n\tmove 1\n}\n}\n") {
        Ok(()) => println!("Recognized (unexpected)"),
        Err(bugs_recognizer::Error::Syntax(e)) => {
            println!("Syntax error: {e}");
        }
        Err(e) => println!("Rejected: {e}"),
    }
}
