//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName},
};

/// Create a category and return it with its generated ID.
pub fn create_category(name: CategoryName, connection: &Connection) -> Result<Category, Error> {
    connection.execute("INSERT INTO category (name) VALUES (?1);", (name.as_ref(),))?;

    let id = connection.last_insert_rowid();

    Ok(Category { id, name })
}

/// Retrieve a single category by ID.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all categories ordered alphabetically by name.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name FROM category ORDER BY name ASC;")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Update a category's name. Returns an error if the category doesn't exist.
pub fn update_category(
    category_id: CategoryId,
    new_name: CategoryName,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE category SET name = ?1 WHERE id = ?2",
        (new_name.as_ref(), category_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCategory);
    }

    Ok(())
}

/// Delete a category by ID. Returns an error if the category doesn't exist.
///
/// Expenses referencing the category are left in place; reports group them
/// under the "Unknown" bucket.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM category WHERE id = ?1", [category_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingCategory);
    }

    Ok(())
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_category_name ON category(name);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);

    Ok(Category { id, name })
}


#[cfg(test)]
mod category_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        category::{CategoryName, create_category, get_all_categories, get_category,
            update_category},
    };

    use super::{create_category_table, delete_category};

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_category_table(&connection).expect("Could not create category table");
        connection
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_db_connection();
        let name = CategoryName::new("Groceries").unwrap();

        let category = create_category(name.clone(), &connection);

        let got_category = category.expect("Could not create category");
        assert!(got_category.id > 0);
        assert_eq!(got_category.name, name);
    }

    #[test]
    fn get_category_succeeds() {
        let connection = get_test_db_connection();
        let name = CategoryName::new_unchecked("Foo");
        let inserted_category =
            create_category(name, &connection).expect("Could not create test category");

        let selected_category = get_category(inserted_category.id, &connection);

        assert_eq!(Ok(inserted_category), selected_category);
    }

    #[test]
    fn get_category_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();
        let inserted_category = create_category(CategoryName::new_unchecked("Foo"), &connection)
            .expect("Could not create test category");

        let selected_category = get_category(inserted_category.id + 123, &connection);

        assert_eq!(selected_category, Err(Error::NotFound));
    }

    #[test]
    fn get_all_categories_orders_by_name() {
        let connection = get_test_db_connection();

        let zoo = create_category(CategoryName::new_unchecked("Zoo"), &connection)
            .expect("Could not create test category");
        let art = create_category(CategoryName::new_unchecked("Art"), &connection)
            .expect("Could not create test category");

        let selected_categories =
            get_all_categories(&connection).expect("Could not get all categories");

        assert_eq!(selected_categories, vec![art, zoo]);
    }

    #[test]
    fn update_category_succeeds() {
        let connection = get_test_db_connection();
        let original_name = CategoryName::new_unchecked("Original");
        let category =
            create_category(original_name, &connection).expect("Could not create test category");

        let new_name = CategoryName::new_unchecked("Updated");
        let result = update_category(category.id, new_name.clone(), &connection);

        assert!(result.is_ok());

        let updated_category =
            get_category(category.id, &connection).expect("Could not get updated category");
        assert_eq!(updated_category.name, new_name);
        assert_eq!(updated_category.id, category.id);
    }

    #[test]
    fn update_category_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();
        let invalid_id = 999999;
        let new_name = CategoryName::new_unchecked("Updated");

        let result = update_category(invalid_id, new_name, &connection);

        assert_eq!(result, Err(Error::UpdateMissingCategory));
    }

    #[test]
    fn delete_category_succeeds() {
        let connection = get_test_db_connection();
        let name = CategoryName::new_unchecked("ToDelete");
        let category = create_category(name, &connection).expect("Could not create test category");

        let result = delete_category(category.id, &connection);

        assert!(result.is_ok());

        let get_result = get_category(category.id, &connection);
        assert_eq!(get_result, Err(Error::NotFound));
    }

    #[test]
    fn delete_category_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();
        let invalid_id = 999999;

        let result = delete_category(invalid_id, &connection);

        assert_eq!(result, Err(Error::DeleteMissingCategory));
    }
}
