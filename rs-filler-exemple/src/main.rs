use rs_filler_core::report;
use rs_filler_core::{Dictionary, FillerError, GenerationInput, Generator, Granularity};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug shows what the library does
    env_logger::init();

    // Built-in dictionaries are "Latin" and "Seussian"
    // Word files are tokenized on delimiters; Dictionary::load("./data/x.txt")
    // also writes ./data/x.bin and reads it next time
    let mut dict = Dictionary::embedded("Seussian");
    println!("{}: {} words, {} lengths", dict.name().unwrap_or("?"), dict.length(), dict.row_count());

    // Same seed, same text
    let mut generator = Generator::with_seed(7);

    // Exactly 80 characters, spaces included
    println!("{}", generator.generate(&dict, Granularity::Letters, 80, 80)?);

    // Between 5 and 10 words
    println!("{}", generator.generate(&dict, Granularity::Words, 5, 10)?);

    // Sentence and paragraph shapes can be tuned
    let mut input = GenerationInput::new(Granularity::Paragraphs, 2, 2);
    input.set_sentence_words(4, 8)?;
    input.set_paragraph_sentences(2, 3)?;
    input.set_comma_chance(0.25)?;
    println!("{}", generator.generate_with(&dict, &input)?);

    // Invalid shapes are refused
    match input.set_comma_chance(2.0) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{}", e),
    }

    // Request errors come before dictionary errors
    match generator.generate(&dict, Granularity::Words, 10, 1) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{}", report::describe(&dict, e)),
    }

    // A too small dictionary is recoverable: add words and retry
    let mut tiny = Dictionary::from_name_and_tokens("tiny", "one fish two fish red fish blue fish", " ");
    match generator.generate(&tiny, Granularity::Words, 3, 3) {
        Err(FillerError::DictTooSmall) => report::warn(&tiny, FillerError::DictTooSmall),
        other => println!("Should not happen: {:?}", other),
    }
    tiny.merge(&dict).prune();
    println!("{}", generator.generate(&tiny, Granularity::Words, 3, 3)?);

    // Words inserted loosely are kept as given; clean normalizes them again
    dict.append("Green, eggs!");
    println!("before clean: {:?}", dict.validate());
    dict.clean();
    println!("after clean: {:?}", dict.validate());

    // Sorting orders words by length, insertion order within a length
    let mut quick = Dictionary::new();
    quick.append_all(["this", "is", "a", "quick", "test", "of", "sorting"]);
    quick.sort();
    println!("{}", quick);
    println!("{}", quick.join(" "));

    Ok(())
}
