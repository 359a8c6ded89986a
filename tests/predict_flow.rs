mod common;

use classify_lens::document::document::lock;
use classify_lens::document::elements::{FILE_INPUT, RESULT};
use classify_lens::{
    predict, shared, ClientConfig, Document, Elements, PredictClient, PredictOutcome,
    SelectedFile, SharedDocument, NO_FILE_ALERT,
};

use common::{dead_base_url, png_bytes, MockServer, Reply};

fn client_for(base_url: String) -> PredictClient {
    let config = ClientConfig { base_url, ..Default::default() };
    PredictClient::new(&config).unwrap()
}

fn page_with(file: Option<SelectedFile>) -> SharedDocument {
    let mut doc = Document::standard();
    doc.select_files(FILE_INPUT, file.into_iter().collect()).unwrap();
    shared(doc)
}

fn result_of(doc: &SharedDocument) -> String {
    lock(doc).text_content(RESULT).unwrap().to_owned()
}

#[test]
fn renders_class_and_confidence() {
    let server = MockServer::start(Reply::json(200, r#"{"class":"cat","confidence":0.8765}"#));
    let doc = page_with(Some(SelectedFile::new("cat.png", png_bytes(8, 8))));

    let outcome = predict(&doc, &Elements::default(), &client_for(server.base_url())).unwrap();

    assert_eq!(outcome, PredictOutcome::Rendered("Class: cat, Confidence: 87.65%".into()));
    assert_eq!(result_of(&doc), "Class: cat, Confidence: 87.65%");
}

#[test]
fn uploads_file_under_file_field() {
    let server = MockServer::start(Reply::json(200, r#"{"class":"Yeast","confidence":0.91}"#));
    let bytes = png_bytes(12, 5);
    let doc = page_with(Some(SelectedFile::new("yeast.png", bytes.clone())));

    predict(&doc, &Elements::default(), &client_for(server.base_url())).unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/predict");
    assert!(req.content_type.starts_with("multipart/form-data; boundary="));

    let part = req.file_part("file").expect("file part");
    assert_eq!(part.filename, "yeast.png");
    assert_eq!(part.content_type, "image/png");
    assert_eq!(part.bytes, bytes);
}

#[test]
fn no_file_alerts_and_sends_nothing() {
    let server = MockServer::start(Reply::json(200, r#"{"class":"cat","confidence":1}"#));
    let doc = page_with(None);

    let outcome = predict(&doc, &Elements::default(), &client_for(server.base_url())).unwrap();

    assert_eq!(outcome, PredictOutcome::NoFile);
    assert_eq!(lock(&doc).alerts(), [NO_FILE_ALERT]);
    assert_eq!(result_of(&doc), "");
    assert!(server.requests().is_empty());
}

#[test]
fn unreachable_server_shows_generic_error() {
    let doc = page_with(Some(SelectedFile::new("cat.png", png_bytes(4, 4))));

    let outcome = predict(&doc, &Elements::default(), &client_for(dead_base_url())).unwrap();

    assert_eq!(outcome, PredictOutcome::Failed);
    assert_eq!(result_of(&doc), "Error making prediction");
}

#[test]
fn non_json_body_shows_generic_error() {
    let server = MockServer::start(Reply::json(502, "<html>Bad Gateway</html>"));
    let doc = page_with(Some(SelectedFile::new("cat.png", png_bytes(4, 4))));

    let outcome = predict(&doc, &Elements::default(), &client_for(server.base_url())).unwrap();

    assert_eq!(outcome, PredictOutcome::Failed);
    assert_eq!(result_of(&doc), "Error making prediction");
}

#[test]
fn error_status_with_json_body_is_rendered_unvalidated() {
    let server = MockServer::start(Reply::json(500, r#"{"detail":"Model not loaded"}"#));
    let doc = page_with(Some(SelectedFile::new("cat.png", png_bytes(4, 4))));

    predict(&doc, &Elements::default(), &client_for(server.base_url())).unwrap();

    assert_eq!(result_of(&doc), "Class: undefined, Confidence: NaN%");
}

#[test]
fn later_response_overwrites_earlier_result() {
    let first = MockServer::start(Reply::json(200, r#"{"class":"Hydra","confidence":0.5}"#));
    let second = MockServer::start(Reply::json(200, r#"{"class":"Amoeba","confidence":0.25}"#));
    let doc = page_with(Some(SelectedFile::new("a.png", png_bytes(4, 4))));
    let elements = Elements::default();

    predict(&doc, &elements, &client_for(first.base_url())).unwrap();
    predict(&doc, &elements, &client_for(second.base_url())).unwrap();

    assert_eq!(result_of(&doc), "Class: Amoeba, Confidence: 25.00%");
}

#[test]
fn custom_selectors_are_honoured() {
    let server = MockServer::start(Reply::json(200, r#"{"class":"Rod_bacteria","confidence":0.1}"#));
    let mut doc = Document::new();
    doc.insert_file_input("picker");
    doc.insert_container("out");
    doc.select_files("picker", vec![SelectedFile::new("r.png", png_bytes(2, 2))]).unwrap();
    let doc = shared(doc);
    let elements = Elements {
        file_input:    "picker".into(),
        image_preview: "unused".into(),
        result:        "out".into(),
    };

    predict(&doc, &elements, &client_for(server.base_url())).unwrap();

    assert_eq!(lock(&doc).text_content("out").unwrap(), "Class: Rod_bacteria, Confidence: 10.00%");
}

#[test]
fn missing_result_element_is_an_error() {
    let server = MockServer::start(Reply::json(200, r#"{"class":"cat","confidence":0.5}"#));
    let mut doc = Document::new();
    doc.insert_file_input(FILE_INPUT);
    doc.select_files(FILE_INPUT, vec![SelectedFile::new("c.png", vec![1])]).unwrap();

    let result = predict(&shared(doc), &Elements::default(), &client_for(server.base_url()));

    assert!(result.is_err());
}

#[test]
fn ping_decodes_json_string() {
    let server = MockServer::start(Reply::json(200, r#""hello I am alive""#));
    let reply = client_for(server.base_url()).ping().unwrap();
    assert_eq!(reply, "hello I am alive");
    assert_eq!(server.requests()[0].path, "/ping");
}
