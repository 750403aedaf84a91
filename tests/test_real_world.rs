use recipe_ingredients::IngredientExtractor;
use std::env;

#[tokio::test]
#[ignore] // This test requires network access and is subject to external site changes
async fn test_delishkitchen_recipe() {
    env::set_var("RUST_LOG", "debug");
    let _ = env_logger::try_init();

    let extractor = IngredientExtractor::builder().build().unwrap();
    match extractor
        .extract("https://delishkitchen.tv/recipes/147726740381425917")
        .await
    {
        Ok(rows) => {
            println!("Extracted {} ingredients", rows.len());
            assert!(rows.iter().all(|r| !r.ingredient.is_empty() && !r.amount.is_empty()));
        }
        Err(e) => {
            panic!("Failed to extract ingredients: {e}");
        }
    }
}

#[tokio::test]
#[ignore] // Requires network access and a local Chrome installation
async fn test_cookien_rendered_recipe() {
    let _ = env_logger::try_init();

    let extractor = IngredientExtractor::builder()
        .render_host("cookien.com")
        .build()
        .unwrap();
    let rows = extractor
        .extract("https://cookien.com/recipe/31470/")
        .await
        .expect("rendered extraction failed");

    assert!(!rows.is_empty());
}
