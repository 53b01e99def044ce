//! Snapshot tests for synthesized SQL.

use recmap_sql::*;

fn cols(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_select_projection_and_order() {
    let sql = select(
        "albums",
        &cols(&["id", "title", "published"]),
        "published=true",
        &["title:asc".to_string(), "id:DESC".to_string()],
        20,
    )
    .unwrap();
    insta::assert_snapshot!(
        sql,
        @"select id,title,published from albums where published=true order by title ASC, id DESC limit 20"
    );
}

#[test]
fn test_insert_per_dialect() {
    let columns = cols(&["Id", "Title"]);
    insta::assert_snapshot!(
        insert(&DialectPolicy::POSTGRES, "albums", &columns),
        @r#"INSERT INTO albums ("id","title") VALUES ($1,$2)"#
    );
    insta::assert_snapshot!(
        insert(&DialectPolicy::MYSQL, "albums", &columns),
        @"INSERT INTO albums (`id`,`title`) VALUES (?,?)"
    );
}

#[test]
fn test_update_with_key_criteria() {
    let columns = cols(&["ABC", "BCD", "YYY"]);
    let row = vec![Value::from("abc"), Value::Int(123), Value::Int(233)];
    let predicate = where_from_keys(&["ABC".to_string()], &columns, &row);
    let sql = format!(
        "{}{}",
        update(&DialectPolicy::POSTGRES, "ABC", &columns),
        predicate
    );
    insta::assert_snapshot!(sql, @"UPDATE ABC SET ABC=$1,BCD=$2,YYY=$3 WHERE ABC=abc");
}

#[test]
fn test_delete_with_like_criteria() {
    let fields = cols(&["%title", "plays"]);
    let row = vec![Value::from("night%"), Value::Int(3)];
    let sql = delete("albums", &where_for_delete(&fields, &row));
    insta::assert_snapshot!(sql, @"DELETE FROM albums WHERE title LIKE 'night%' AND plays=3");
}
