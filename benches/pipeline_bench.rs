use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use vocab_harvest::parallel_processing::classify_parallel;
use vocab_harvest::{
    clean_sentence, detect_boundaries, extract_sentences, AnnotatedSentence, BoundaryConfig, Classifier, Document,
    PartOfSpeech, ReferenceData, SentenceSegmenter, TokenAnnotation,
};

const PAGE_BODY: &str = "La niña se sentó junto al río. Miraba el agua correr-\n entre las piedras. \
-¿Vienes? -preguntó su hermano. No contestó. El Sr. Gómez se fue al pueblo.\n";

fn build_document(pages: usize) -> Document {
    Document::new(
        (1..=pages)
            .map(|page| format!("EL CAMINO\n{PAGE_BODY}Editorial Sol {page} de {pages}\n"))
            .collect(),
    )
}

fn build_sentences(count: usize) -> Vec<AnnotatedSentence> {
    (0..count)
        .map(|_| {
            AnnotatedSentence::from_tokens(
                None,
                vec![
                    TokenAnnotation::new("La", PartOfSpeech::Det, "el"),
                    TokenAnnotation::new("niña", PartOfSpeech::Noun, "niña"),
                    TokenAnnotation::new("se", PartOfSpeech::Pron, "él"),
                    TokenAnnotation::new("sentó", PartOfSpeech::Verb, "sentar"),
                    TokenAnnotation::new("quiere", PartOfSpeech::Verb, "querer"),
                    TokenAnnotation::new("alegrar", PartOfSpeech::Verb, "alegrar se"),
                    TokenAnnotation::new("fue", PartOfSpeech::Verb, "fue"),
                    TokenAnnotation::new("traduc", PartOfSpeech::Verb, "traduc"),
                ],
            )
        })
        .collect()
}

fn build_classifier() -> Classifier {
    let known: HashSet<String> = ["el", "la", "se"].iter().map(|s| s.to_string()).collect();
    let mappings: HashMap<String, String> = [("fue".to_string(), "ir".to_string())].into_iter().collect();
    Classifier::with_default_config(Arc::new(ReferenceData::new(known, HashSet::new(), mappings)))
}

fn bench_sentence_stage(c: &mut Criterion) {
    let mut group = c.benchmark_group("sentence_stage");
    let config = BoundaryConfig::default();
    let segmenter = SentenceSegmenter::new().unwrap();
    let document = build_document(200);
    let patterns = detect_boundaries(&document.sample(config.sample_pages), &config).unwrap();

    group.bench_function("detect_boundaries", |b| {
        b.iter(|| detect_boundaries(black_box(&document.sample(config.sample_pages)), &config).unwrap())
    });

    group.throughput(Throughput::Bytes(PAGE_BODY.len() as u64));
    group.bench_function("clean_sentence", |b| {
        b.iter(|| clean_sentence(black_box(PAGE_BODY), &patterns))
    });

    let text_len = document.full_text().len() as u64;
    group.throughput(Throughput::Bytes(text_len));
    group.bench_function("extract_sentences_200_pages", |b| {
        b.iter(|| extract_sentences(black_box(&document), &config, &segmenter).unwrap())
    });

    group.finish();
}

fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");
    let classifier = Arc::new(build_classifier());
    let sentences = build_sentences(10_000);
    group.throughput(Throughput::Elements(sentences.len() as u64));

    group.bench_function("sequential", |b| {
        b.iter(|| {
            let mut counts = vocab_harvest::ClassificationCounts::new();
            for sentence in &sentences {
                classifier.classify_into(black_box(sentence), &mut counts);
            }
            counts
        })
    });

    let runtime = tokio::runtime::Runtime::new().unwrap();
    for workers in [1, 4] {
        group.bench_function(format!("parallel_{workers}_workers"), |b| {
            b.to_async(&runtime)
                .iter(|| classify_parallel(Arc::clone(&classifier), sentences.clone(), workers))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sentence_stage, bench_classification);
criterion_main!(benches);
