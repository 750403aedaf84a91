use mockito::Matcher;
use recipe_ingredients::adapters::{
    CookienAdapter, CookpadAdapter, DelishKitchenAdapter, SiteAdapter,
};
use recipe_ingredients::fetchers::RequestFetcher;
use recipe_ingredients::{IngredientExtractor, IngredientRow};
use std::time::Duration;

const COOKPAD_PAGE: &str = r#"
<!DOCTYPE html>
<html lang="ja">
<body>
  <h1>鶏の照り焼き</h1>
  <div id="ingredients">
    <div class="ingredient-list">
      <ol>
        <li class="justified-quantity-and-name not-headline">
          <span>鶏もも肉</span> <bdi class="font-semibold">1枚（300g）</bdi>
        </li>
        <li class="justified-quantity-and-name font-semibold headline">
          <span>【調味料】･･･★は先に混ぜておく</span> <bdi class="font-semibold"></bdi>
        </li>
        <li class="justified-quantity-and-name not-headline">
          <span>★しょうゆ</span> <bdi>大さじ2</bdi>
        </li>
        <li class="justified-quantity-and-name not-headline">
          <span>☆みりん</span> <bdi>大さじ2</bdi>
        </li>
      </ol>
    </div>
  </div>
</body>
</html>
"#;

const DELISH_PAGE: &str = r#"
<html><body>
  <ul class="ingredient-list">
    <li class="ingredient"><a class="ingredient-name"> ピーマン </a><span class="ingredient-serving">2個</span></li>
    <li class="ingredient"><a class="ingredient-name">豚ひき肉</a><span class="ingredient-serving">150g</span></li>
  </ul>
</body></html>
"#;

const COOKIEN_PAGE: &str = r#"
<html><body>
  <div id="r_contents">
    <p>豚もも薄切り肉<span>約２００ｇ（８～１０枚）</span></p>
    <p>◎しょうゆ（メモ1）<span>大さじ1</span></p>
    <p>◯砂糖<span>小さじ2</span></p>
  </div>
</body></html>
"#;

async fn extract_from(
    page: &str,
    adapter: impl SiteAdapter + 'static,
) -> Vec<IngredientRow> {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipes/1")
        .match_header("user-agent", Matcher::Regex("Chrome/".to_string()))
        .match_header("accept-language", Matcher::Regex("^ja".to_string()))
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(page)
        .create_async()
        .await;

    let fetcher = RequestFetcher::new(Duration::from_secs(5)).unwrap();
    let extractor = IngredientExtractor::builder()
        .without_builtin_sources()
        .source("127.0.0.1", fetcher, adapter)
        .build()
        .unwrap();

    let url = format!("{}/recipes/1", server.url());
    extractor.extract(&url).await.unwrap()
}

fn assert_valid(rows: &[IngredientRow]) {
    assert!(!rows.is_empty());
    for row in rows {
        assert!(!row.ingredient.is_empty());
        assert!(!row.amount.is_empty());
        assert!(!row.checked);
    }
}

#[tokio::test]
async fn test_cookpad_page() {
    let rows = extract_from(COOKPAD_PAGE, CookpadAdapter).await;

    assert_valid(&rows);
    assert_eq!(
        rows,
        vec![
            IngredientRow::new("鶏もも肉", "1枚（300g）"),
            IngredientRow::new("しょうゆ", "大さじ2"),
            IngredientRow::new("みりん", "大さじ2"),
        ]
    );
}

#[tokio::test]
async fn test_delishkitchen_page() {
    let rows = extract_from(DELISH_PAGE, DelishKitchenAdapter).await;

    assert_valid(&rows);
    assert_eq!(
        rows,
        vec![
            IngredientRow::new("ピーマン", "2個"),
            IngredientRow::new("豚ひき肉", "150g"),
        ]
    );
}

#[tokio::test]
async fn test_cookien_page() {
    let rows = extract_from(COOKIEN_PAGE, CookienAdapter).await;

    assert_valid(&rows);
    assert_eq!(
        rows,
        vec![
            IngredientRow::new("豚もも薄切り肉", "約２００ｇ（８～１０枚）"),
            IngredientRow::new("しょうゆ", "大さじ1"),
            IngredientRow::new("砂糖", "小さじ2"),
        ]
    );
}

#[tokio::test]
async fn test_same_page_twice_gives_same_rows() {
    let first = extract_from(COOKPAD_PAGE, CookpadAdapter).await;
    let second = extract_from(COOKPAD_PAGE, CookpadAdapter).await;
    assert_eq!(first, second);
}
