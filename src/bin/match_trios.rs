use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    meeting_trios::apps::run_match_trios(std::env::args().skip(1))
}
