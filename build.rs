use vergen_gitcl::{Emitter, Gitcl};

// Git branch/sha/dirty for `version::version_string()`; outside a git
// checkout vergen emits defaults and a warning.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let gitcl = Gitcl::builder().branch(true).sha(true).dirty(true).build();

    Emitter::default().add_instructions(&gitcl)?.emit()?;

    Ok(())
}
