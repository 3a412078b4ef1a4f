use criterion::{criterion_group, criterion_main, Criterion};
use pinyin_collate::{sort_strings, CollationOptions, Collator, RuleVariant};

fn load_words() -> Vec<String> {
    let test_data = std::fs::read_to_string("test-data/words.txt").unwrap();

    // Repeat the list so sorting has some work to do
    test_data
        .lines()
        .filter(|line| !line.is_empty())
        .cycle()
        .take(5_000)
        .map(str::to_owned)
        .collect()
}

fn collator(variant: RuleVariant) -> Collator {
    Collator::new(CollationOptions {
        variant,
        normalize: true,
    })
}

fn bench_variant(c: &mut Criterion, name: &str, variant: RuleVariant) {
    let words = load_words();
    let collator = collator(variant);

    c.bench_function(&format!("{name}, pairwise"), |b| {
        b.iter(|| {
            let mut words = words.clone();
            words.sort_by(|x, y| collator.compare(x, y));
            words
        })
    });

    c.bench_function(&format!("{name}, sort keys"), |b| {
        b.iter(|| sort_strings(words.clone(), &collator, false))
    });
}

fn case_folding(c: &mut Criterion) {
    bench_variant(c, "Case folding", RuleVariant::WeightTableCaseFolding);
}

fn full_alphabet(c: &mut Criterion) {
    bench_variant(c, "Full alphabet", RuleVariant::WeightTableFullAlphabet);
}

fn syllables(c: &mut Criterion) {
    bench_variant(c, "Syllables", RuleVariant::SyllableDecomposition);
}

criterion_group!(benches, case_folding, full_alphabet, syllables);
criterion_main!(benches);
