//! The admin API endpoint catalog.
//!
//! Each row declares an [`EndpointDescriptor`] constant and a snake_case
//! method on [`ShopifyApi`] that calls it:
//!
//! ```text
//! method_name, CONST_NAME => "endpointName", Method, "/admin/path/{param}.json", unwrap_key, "description";
//! ```

use serde_json::Value;

use crate::clients::HttpMethod;
use crate::rest::{ApiError, EndpointDescriptor, Params, ShopifyApi};

macro_rules! endpoints {
    ($(
        $method_name:ident, $const_name:ident => $name:literal, $http:ident, $path:literal,
        $unwrap:expr, $description:literal;
    )*) => {
        $(
            #[doc = concat!($description, ".\n\n`", stringify!($http), " ", $path, "`")]
            pub const $const_name: EndpointDescriptor = EndpointDescriptor::new(
                $name,
                HttpMethod::$http,
                $path,
                $unwrap,
                $description,
            );
        )*

        /// Every endpoint in the catalog.
        pub static ENDPOINTS: &[EndpointDescriptor] = &[$($const_name),*];

        impl ShopifyApi {
            $(
                #[doc = concat!($description, ".\n\n`", stringify!($http), " ", $path, "`")]
                ///
                /// # Errors
                ///
                /// As [`call`](Self::call).
                pub async fn $method_name(&self, params: Params) -> Result<Value, ApiError> {
                    self.call(&$const_name, params).await
                }
            )*
        }
    };
}

/// Looks up a catalog endpoint by name, e.g. `"getOrders"`.
#[must_use]
pub fn find_endpoint(name: &str) -> Option<&'static EndpointDescriptor> {
    ENDPOINTS.iter().find(|endpoint| endpoint.name == name)
}

endpoints! {
    get_policies, GET_POLICIES => "getPolicies", Get, "/admin/policies.json", Some("policies"), "Receive a list of all Policies";
    create_recurring_application_charge, CREATE_RECURRING_APPLICATION_CHARGE => "createRecurringApplicationCharge", Post, "/admin/recurring_application_charges.json", Some("recurring_application_charge"), "Create a recurring application charge";
    get_recurring_application_charge, GET_RECURRING_APPLICATION_CHARGE => "getRecurringApplicationCharge", Get, "/admin/recurring_application_charges/{id}.json", Some("recurring_application_charge"), "Receive a single RecurringApplicationCharge";
    get_recurring_application_charges, GET_RECURRING_APPLICATION_CHARGES => "getRecurringApplicationCharges", Get, "/admin/recurring_application_charges.json", Some("recurring_application_charges"), "Retrieve all recurring application charges";
    activate_recurring_application_charge, ACTIVATE_RECURRING_APPLICATION_CHARGE => "activateRecurringApplicationCharge", Post, "/admin/recurring_application_charges/{id}/activate.json", None, "Activate a recurring application charge";
    cancel_recurring_application_charge, CANCEL_RECURRING_APPLICATION_CHARGE => "cancelRecurringApplicationCharge", Delete, "/admin/recurring_application_charges/{id}.json", None, "Cancel a recurring application charge";
    get_metafields, GET_METAFIELDS => "getMetafields", Get, "/admin/metafields.json", Some("metafields"), "Get metafields that belong to a store";
    get_product_metafields, GET_PRODUCT_METAFIELDS => "getProductMetafields", Get, "/admin/products/{id}/metafields.json", Some("metafields"), "Get metafields that belong to a product";
    count_metafields, COUNT_METAFIELDS => "countMetafields", Get, "/admin/metafields/count.json", Some("count"), "Get a count of metafields that belong to a store";
    count_product_metafields, COUNT_PRODUCT_METAFIELDS => "countProductMetafields", Get, "/admin/products/{id}/metafields/count.json", Some("count"), "Get a count of metafields that belong to a product";
    get_metafield_by_id, GET_METAFIELD_BY_ID => "getMetafieldByID", Get, "/admin/metafields/{id}.json", Some("metafield"), "Get a single store metafield by its ID";
    get_product_metafield_by_id, GET_PRODUCT_METAFIELD_BY_ID => "getProductMetafieldByID", Get, "/admin/products/{productId}/metafields/{id}.json", Some("metafield"), "Get a single product metafield by its ID";
    create_metafield, CREATE_METAFIELD => "createMetafield", Post, "/admin/metafields.json", None, "Create a new metafield for a store";
    create_product_metafield, CREATE_PRODUCT_METAFIELD => "createProductMetafield", Post, "/admin/products/{id}/metafields.json", Some("metafield"), "Create a new metafield for a product";
    modify_metafield, MODIFY_METAFIELD => "modifyMetafield", Put, "/admin/metafields/{id}.json", Some("metafield"), "Update a store metafield";
    modify_product_metafield, MODIFY_PRODUCT_METAFIELD => "modifyProductMetafield", Put, "/admin/products/{productId}/metafields/{id}.json", Some("metafield"), "Update a product metafield";
    remove_metafield, REMOVE_METAFIELD => "removeMetafield", Delete, "/admin/metafields/{id}.json", None, "Delete a store metafield";
    remove_product_metafield, REMOVE_PRODUCT_METAFIELD => "removeProductMetafield", Delete, "/admin/products/{productId}/metafields/{id}.json", None, "Delete a product metafield";
    get_webhooks, GET_WEBHOOKS => "getWebhooks", Get, "/admin/webhooks.json", Some("webhooks"), "Receive a list of all Webhooks";
    count_webhooks, COUNT_WEBHOOKS => "countWebhooks", Get, "/admin/webhooks/count.json", Some("count"), "Receive a count of all Webhooks";
    get_webhook, GET_WEBHOOK => "getWebhook", Get, "/admin/webhooks/{id}.json", Some("webhook"), "Receive a single Webhook";
    create_webhook, CREATE_WEBHOOK => "createWebhook", Post, "/admin/webhooks.json", Some("webhook"), "Create a new Webhook";
    modify_webhook, MODIFY_WEBHOOK => "modifyWebhook", Put, "/admin/webhooks/{id}.json", Some("webhook"), "Modify an existing Webhook";
    remove_webhook, REMOVE_WEBHOOK => "removeWebhook", Delete, "/admin/webhooks/{id}.json", None, "Remove a Webhook from the database";
    get_provinces, GET_PROVINCES => "getProvinces", Get, "/admin/countries/{id}/provinces.json", Some("provinces"), "Receive a list of all Provinces";
    count_provinces, COUNT_PROVINCES => "countProvinces", Get, "/admin/countries/{id}/provinces/count.json", Some("count"), "Receive a count of all Provinces";
    get_province, GET_PROVINCE => "getProvince", Get, "/admin/countries/{countryId}/provinces/{id}.json", Some("province"), "Receive a single Province";
    modify_province, MODIFY_PROVINCE => "modifyProvince", Put, "/admin/countries/{countryId}/provinces/{id}.json", Some("province"), "Modify an existing Province";
    get_customer_saved_searches, GET_CUSTOMER_SAVED_SEARCHES => "getCustomerSavedSearches", Get, "/admin/customer_saved_searches.json", Some("customer_saved_searches"), "Receive a list of all CustomerSavedSearches";
    count_customer_saved_searches, COUNT_CUSTOMER_SAVED_SEARCHES => "countCustomerSavedSearches", Get, "/admin/customer_saved_searches/count.json", Some("count"), "Receive a count of all CustomerSavedSearches";
    get_customer_saved_search, GET_CUSTOMER_SAVED_SEARCH => "getCustomerSavedSearch", Get, "/admin/customer_saved_searches/{id}.json", Some("customer_saved_search"), "Receive a single CustomerSavedSearch";
    get_customers_from_customer_saved_search, GET_CUSTOMERS_FROM_CUSTOMER_SAVED_SEARCH => "getCustomersFromCustomerSavedSearch", Get, "/admin/customer_saved_searches/{id}/customers.json", Some("customers"), "Receive all Customers resulting from a Customer Saved Search";
    create_customer_saved_search, CREATE_CUSTOMER_SAVED_SEARCH => "createCustomerSavedSearch", Post, "/admin/customer_saved_searches.json", Some("customer_saved_search"), "Create a new CustomerSavedSearch";
    modify_customer_saved_search, MODIFY_CUSTOMER_SAVED_SEARCH => "modifyCustomerSavedSearch", Put, "/admin/customer_saved_searches/{id}.json", Some("customer_saved_search"), "Modify an existing CustomerSavedSearch";
    remove_customer_saved_search, REMOVE_CUSTOMER_SAVED_SEARCH => "removeCustomerSavedSearch", Delete, "/admin/customer_saved_searches/{id}.json", None, "Remove a CustomerSavedSearch from the database";
    get_variants, GET_VARIANTS => "getVariants", Get, "/admin/products/{id}/variants.json", Some("variants"), "Receive a list of all Product Variants";
    count_variants, COUNT_VARIANTS => "countVariants", Get, "/admin/products/{id}/variants/count.json", Some("count"), "Receive a count of all Product Variants";
    get_variant, GET_VARIANT => "getVariant", Get, "/admin/variants/{id}.json", Some("variant"), "Receive a single Product Variant";
    create_variant, CREATE_VARIANT => "createVariant", Post, "/admin/products/{id}/variants.json", Some("variant"), "Create a new Product Variant";
    modify_variant, MODIFY_VARIANT => "modifyVariant", Put, "/admin/variants/{id}.json", Some("variant"), "Modify an existing Product Variant";
    remove_variant, REMOVE_VARIANT => "removeVariant", Delete, "/admin/products/{productId}/variants/{id}.json", None, "Remove a Product Variant from the database";
    count_checkouts, COUNT_CHECKOUTS => "countCheckouts", Get, "/admin/checkouts/count.json", Some("count"), "Receive a count of all Checkouts";
    get_checkouts, GET_CHECKOUTS => "getCheckouts", Get, "/admin/checkouts.json", Some("checkouts"), "Receive a list of all Checkouts";
    get_customers, GET_CUSTOMERS => "getCustomers", Get, "/admin/customers.json", Some("customers"), "Receive a list of all Customers";
    search_customers, SEARCH_CUSTOMERS => "searchCustomers", Get, "/admin/customers/search.json", Some("customers"), "Search for customers matching supplied query";
    get_customer, GET_CUSTOMER => "getCustomer", Get, "/admin/customers/{id}.json", Some("customer"), "Receive a single Customer";
    create_customer, CREATE_CUSTOMER => "createCustomer", Post, "/admin/customers.json", Some("customer"), "Create a new Customer";
    modify_customer, MODIFY_CUSTOMER => "modifyCustomer", Put, "/admin/customers/{id}.json", Some("customer"), "Modify an existing Customer";
    remove_customer, REMOVE_CUSTOMER => "removeCustomer", Delete, "/admin/customers/{id}.json", None, "Remove a Customer from the database";
    count_customers, COUNT_CUSTOMERS => "countCustomers", Get, "/admin/customers/count.json", Some("count"), "Receive a count of all Customers";
    get_shop, GET_SHOP => "getShop", Get, "/admin/shop.json", Some("shop"), "Receive a single Shop";
    get_transactions, GET_TRANSACTIONS => "getTransactions", Get, "/admin/orders/{id}/transactions.json", Some("transactions"), "Receive a list of all Transactions";
    count_transactions, COUNT_TRANSACTIONS => "countTransactions", Get, "/admin/orders/{id}/transactions/count.json", Some("count"), "Receive a count of all Transactions";
    get_transaction, GET_TRANSACTION => "getTransaction", Get, "/admin/orders/{orderId}/transactions/{id}.json", Some("transaction"), "Receive a single Transaction";
    create_transaction, CREATE_TRANSACTION => "createTransaction", Post, "/admin/orders/{id}/transactions.json", Some("transaction"), "Create a new Transaction";
    get_themes, GET_THEMES => "getThemes", Get, "/admin/themes.json", Some("themes"), "Receive a list of all Themes";
    get_theme, GET_THEME => "getTheme", Get, "/admin/themes/{id}.json", Some("theme"), "Receive a single Theme";
    create_theme, CREATE_THEME => "createTheme", Post, "/admin/themes.json", Some("theme"), "Create a new Theme";
    modify_theme, MODIFY_THEME => "modifyTheme", Put, "/admin/themes/{id}.json", Some("theme"), "Modify an existing Theme";
    remove_theme, REMOVE_THEME => "removeTheme", Delete, "/admin/themes/{id}.json", None, "Remove a Theme from the database";
    get_products, GET_PRODUCTS => "getProducts", Get, "/admin/products.json", Some("products"), "Receive a list of all Products";
    count_products, COUNT_PRODUCTS => "countProducts", Get, "/admin/products/count.json", Some("count"), "Receive a count of all Products";
    get_product, GET_PRODUCT => "getProduct", Get, "/admin/products/{id}.json", Some("product"), "Receive a single Product";
    create_product, CREATE_PRODUCT => "createProduct", Post, "/admin/products.json", Some("product"), "Create a new Product";
    modify_product, MODIFY_PRODUCT => "modifyProduct", Put, "/admin/products/{id}.json", Some("product"), "Modify an existing Product";
    remove_product, REMOVE_PRODUCT => "removeProduct", Delete, "/admin/products/{id}.json", None, "Remove a Product from the database";
    get_comments, GET_COMMENTS => "getComments", Get, "/admin/comments.json", Some("comments"), "Receive a list of all Comments";
    count_comments, COUNT_COMMENTS => "countComments", Get, "/admin/comments/count.json", Some("count"), "Receive a count of all Comments";
    get_comment, GET_COMMENT => "getComment", Get, "/admin/comments/{id}.json", Some("comment"), "Receive a single Comment";
    create_comment, CREATE_COMMENT => "createComment", Post, "/admin/comments.json", Some("comment"), "Create a new Comment";
    modify_comment, MODIFY_COMMENT => "modifyComment", Put, "/admin/comments/{id}.json", Some("comment"), "Modify an existing Comment";
    mark_comment_spam, MARK_COMMENT_SPAM => "markCommentSpam", Post, "/admin/comments/{id}/spam.json", None, "Mark a Comment as spam";
    mark_comment_not_spam, MARK_COMMENT_NOT_SPAM => "markCommentNotSpam", Post, "/admin/comments/{id}/not_spam.json", None, "Mark a Comment as not spam";
    approve_comment, APPROVE_COMMENT => "approveComment", Post, "/admin/comments/{id}/approve.json", None, "Approve a Comment";
    remove_comment, REMOVE_COMMENT => "removeComment", Post, "/admin/comments/{id}/remove.json", None, "Remove a Comment";
    restore_comment, RESTORE_COMMENT => "restoreComment", Post, "/admin/comments/{id}/restore.json", None, "Restore a Comment";
    create_application_charge, CREATE_APPLICATION_CHARGE => "createApplicationCharge", Post, "/admin/application_charges.json", Some("application_charge"), "Create a new one-time application charge";
    get_application_charge, GET_APPLICATION_CHARGE => "getApplicationCharge", Get, "/admin/application_charges/{id}.json", Some("application_charge"), "Receive a single ApplicationCharge";
    get_application_charges, GET_APPLICATION_CHARGES => "getApplicationCharges", Get, "/admin/application_charges.json", Some("application_charges"), "Retrieve all one-time application charges";
    activate_application_charge, ACTIVATE_APPLICATION_CHARGE => "activateApplicationCharge", Post, "/admin/application_charges/{id}/activate.json", None, "Activate a one-time application charge";
    get_assets, GET_ASSETS => "getAssets", Get, "/admin/themes/{id}/assets.json", Some("assets"), "Receive a list of all Assets";
    get_asset, GET_ASSET => "getAsset", Get, "/admin/themes/{id}/assets.json", Some("asset"), "Receive a single Asset";
    modify_asset, MODIFY_ASSET => "modifyAsset", Put, "/admin/themes/{id}/assets.json", Some("asset"), "Creating or Modifying an Asset";
    remove_asset, REMOVE_ASSET => "removeAsset", Delete, "/admin/themes/{id}/assets.json", None, "Remove a Asset from the database";
    create_carrier_service, CREATE_CARRIER_SERVICE => "createCarrierService", Post, "/admin/carrier_services.json", Some("carrier_service"), "Create a new CarrierService";
    modify_carrier_service, MODIFY_CARRIER_SERVICE => "modifyCarrierService", Put, "/admin/carrier_services/{id}.json", Some("carrier_service"), "Modify an existing CarrierService";
    get_carrier_services, GET_CARRIER_SERVICES => "getCarrierServices", Get, "/admin/carrier_services.json", Some("carrier_services"), "Receive a list of all CarrierServices";
    get_carrier_service, GET_CARRIER_SERVICE => "getCarrierService", Get, "/admin/carrier_services/{id}.json", Some("carrier_service"), "Receive a single CarrierService";
    remove_carrier_service, REMOVE_CARRIER_SERVICE => "removeCarrierService", Delete, "/admin/carrier_services/{id}.json", None, "Remove a CarrierService from the database";
    get_orders, GET_ORDERS => "getOrders", Get, "/admin/orders.json", Some("orders"), "Retrieve a list of Orders (OPEN Orders by default, use status=any for ALL orders)";
    get_order, GET_ORDER => "getOrder", Get, "/admin/orders/{id}.json", Some("order"), "Receive a single Order";
    count_orders, COUNT_ORDERS => "countOrders", Get, "/admin/orders/count.json", Some("count"), "Receive a count of all Orders";
    close_order, CLOSE_ORDER => "closeOrder", Post, "/admin/orders/{id}/close.json", Some("order"), "Close an Order";
    open_order, OPEN_ORDER => "openOrder", Post, "/admin/orders/{id}/open.json", Some("order"), "Re-open a closed Order";
    cancel_order, CANCEL_ORDER => "cancelOrder", Post, "/admin/orders/{id}/cancel.json", Some("order"), "Cancel an Order";
    create_order, CREATE_ORDER => "createOrder", Post, "/admin/orders.json", Some("order"), "Create a new Order";
    modify_order, MODIFY_ORDER => "modifyOrder", Put, "/admin/orders/{id}.json", Some("order"), "Modify an existing Order";
    remove_order, REMOVE_ORDER => "removeOrder", Delete, "/admin/orders/{id}.json", None, "Remove a Order from the database";
    get_customer_addresses, GET_CUSTOMER_ADDRESSES => "getCustomerAddresses", Get, "/admin/customers/{id}/addresses.json", Some("addresses"), "Receive a list of all CustomerAddresses";
    get_customer_address, GET_CUSTOMER_ADDRESS => "getCustomerAddress", Get, "/admin/customers/{customerId}/addresses/{id}.json", Some("address"), "Receive a single CustomerAddress";
    create_customer_address, CREATE_CUSTOMER_ADDRESS => "createCustomerAddress", Post, "/admin/customers/{id}/addresses.json", Some("address"), "Create a new CustomerAddress";
    modify_customer_address, MODIFY_CUSTOMER_ADDRESS => "modifyCustomerAddress", Put, "/admin/customers/{customerId}/addresses/{id}.json", Some("address"), "Modify an existing CustomerAddress";
    remove_customer_address, REMOVE_CUSTOMER_ADDRESS => "removeCustomerAddress", Delete, "/admin/customers/{customerId}/addresses/{id}.json", None, "Remove a CustomerAddress from the database";
    bulk_modify_customer_addresses, BULK_MODIFY_CUSTOMER_ADDRESSES => "bulkModifyCustomerAddresses", Put, "/admin/customers/{id}/addresses/set.json", None, "Perform bulk operations against a number of addresses";
    set_default_customer_address, SET_DEFAULT_CUSTOMER_ADDRESS => "setDefaultCustomerAddress", Put, "/admin/customers/{customerId}/addresses/{id}/default.json", Some("customer_address"), "Sets default address for a customer";
    get_articles, GET_ARTICLES => "getArticles", Get, "/admin/blogs/{id}/articles.json", Some("articles"), "Receive a list of all Articles";
    count_articles, COUNT_ARTICLES => "countArticles", Get, "/admin/blogs/{id}/articles/count.json", Some("count"), "Receive a count of all Articles";
    get_article, GET_ARTICLE => "getArticle", Get, "/admin/blogs/{blogId}/articles/{id}.json", Some("article"), "Receive a single Article";
    create_article, CREATE_ARTICLE => "createArticle", Post, "/admin/blogs/{id}/articles.json", Some("article"), "Create a new Article";
    modify_article, MODIFY_ARTICLE => "modifyArticle", Put, "/admin/blogs/{blogId}/articles/{id}.json", Some("article"), "Modify an existing Article";
    get_authors, GET_AUTHORS => "getAuthors", Get, "/admin/articles/authors.json", Some("authors"), "Get a list of all the authors";
    get_tags, GET_TAGS => "getTags", Get, "/admin/articles/tags.json", Some("tags"), "Get a list of all the tags";
    remove_article, REMOVE_ARTICLE => "removeArticle", Delete, "/admin/blogs/{blogId}/articles/{id}.json", None, "Remove a Article from the database";
    get_blogs, GET_BLOGS => "getBlogs", Get, "/admin/blogs.json", Some("blogs"), "Receive a list of all Blogs";
    count_blogs, COUNT_BLOGS => "countBlogs", Get, "/admin/blogs/count.json", Some("count"), "Receive a count of all Blogs";
    get_blog, GET_BLOG => "getBlog", Get, "/admin/blogs/{id}.json", Some("blog"), "Receive a single Blog";
    create_blog, CREATE_BLOG => "createBlog", Post, "/admin/blogs.json", Some("blog"), "Create a new Blog";
    modify_blog, MODIFY_BLOG => "modifyBlog", Put, "/admin/blogs/{id}.json", Some("blog"), "Modify an existing Blog";
    remove_blog, REMOVE_BLOG => "removeBlog", Delete, "/admin/blogs/{id}.json", None, "Remove a Blog from the database";
    get_pages, GET_PAGES => "getPages", Get, "/admin/pages.json", Some("pages"), "Receive a list of all Pages";
    count_pages, COUNT_PAGES => "countPages", Get, "/admin/pages/count.json", Some("count"), "Receive a count of all Pages";
    get_page, GET_PAGE => "getPage", Get, "/admin/pages/{id}.json", Some("page"), "Receive a single Page";
    create_page, CREATE_PAGE => "createPage", Post, "/admin/pages.json", Some("page"), "Create a new Page";
    modify_page, MODIFY_PAGE => "modifyPage", Put, "/admin/pages/{id}.json", Some("page"), "Modify an existing Page";
    remove_page, REMOVE_PAGE => "removePage", Delete, "/admin/pages/{id}.json", None, "Remove a Page from the database";
    get_locations, GET_LOCATIONS => "getLocations", Get, "/admin/locations.json", Some("locations"), "Receive a list of all Locations";
    get_location, GET_LOCATION => "getLocation", Get, "/admin/locations/{id}.json", Some("location"), "Receive a single Location";
    get_redirects, GET_REDIRECTS => "getRedirects", Get, "/admin/redirects.json", Some("redirects"), "Receive a list of all Redirects";
    count_redirects, COUNT_REDIRECTS => "countRedirects", Get, "/admin/redirects/count.json", Some("count"), "Receive a count of all Redirects";
    get_redirect, GET_REDIRECT => "getRedirect", Get, "/admin/redirects/{id}.json", Some("redirect"), "Receive a single Redirect";
    create_redirect, CREATE_REDIRECT => "createRedirect", Post, "/admin/redirects.json", Some("redirect"), "Create a new Redirect";
    modify_redirect, MODIFY_REDIRECT => "modifyRedirect", Put, "/admin/redirects/{id}.json", Some("redirect"), "Modify an existing Redirect";
    remove_redirect, REMOVE_REDIRECT => "removeRedirect", Delete, "/admin/redirects/{id}.json", None, "Remove a Redirect from the database";
    get_smart_collections, GET_SMART_COLLECTIONS => "getSmartCollections", Get, "/admin/smart_collections.json", Some("smart_collections"), "Receive a list of all SmartCollections";
    count_smart_collections, COUNT_SMART_COLLECTIONS => "countSmartCollections", Get, "/admin/smart_collections/count.json", Some("count"), "Receive a count of all SmartCollections";
    get_smart_collection, GET_SMART_COLLECTION => "getSmartCollection", Get, "/admin/smart_collections/{id}.json", Some("smart_collection"), "Receive a single SmartCollection";
    create_smart_collection, CREATE_SMART_COLLECTION => "createSmartCollection", Post, "/admin/smart_collections.json", Some("smart_collection"), "Create a new SmartCollection";
    modify_smart_collection, MODIFY_SMART_COLLECTION => "modifySmartCollection", Put, "/admin/smart_collections/{id}.json", Some("smart_collection"), "Modify an existing SmartCollection";
    remove_smart_collection, REMOVE_SMART_COLLECTION => "removeSmartCollection", Delete, "/admin/smart_collections/{id}.json", None, "Remove a SmartCollection from the database";
    create_collect, CREATE_COLLECT => "createCollect", Post, "/admin/collects.json", Some("collect"), "Create a new Collect";
    remove_collect, REMOVE_COLLECT => "removeCollect", Delete, "/admin/collects/{id}.json", None, "Remove a Collect from the database";
    get_collects, GET_COLLECTS => "getCollects", Get, "/admin/collects.json", Some("collects"), "Receive a list of all Collects";
    count_collects, COUNT_COLLECTS => "countCollects", Get, "/admin/collects/count.json", Some("count"), "Receive a count of all Collects";
    get_collect, GET_COLLECT => "getCollect", Get, "/admin/collects/{id}.json", Some("collect"), "Receive a single Collect";
    get_users, GET_USERS => "getUsers", Get, "/admin/users.json", Some("users"), "Receive a list of all Users";
    get_user, GET_USER => "getUser", Get, "/admin/users/{id}.json", Some("user"), "Receive a single User";
    get_events, GET_EVENTS => "getEvents", Get, "/admin/events.json", Some("events"), "Receive a list of all Events";
    get_event, GET_EVENT => "getEvent", Get, "/admin/events/{id}.json", Some("event"), "Receive a single Event";
    count_events, COUNT_EVENTS => "countEvents", Get, "/admin/events/count.json", Some("count"), "Receive a count of all Events";
    get_fulfillments, GET_FULFILLMENTS => "getFulfillments", Get, "/admin/orders/{id}/fulfillments.json", Some("fulfillments"), "Receive a list of all Fulfillments";
    count_fulfillments, COUNT_FULFILLMENTS => "countFulfillments", Get, "/admin/orders/{id}/fulfillments/count.json", Some("count"), "Receive a count of all Fulfillments";
    get_fulfillment, GET_FULFILLMENT => "getFulfillment", Get, "/admin/orders/{orderId}/fulfillments/{id}.json", Some("fulfillment"), "Receive a single Fulfillment";
    create_fulfillment, CREATE_FULFILLMENT => "createFulfillment", Post, "/admin/orders/{id}/fulfillments.json", Some("fulfillment"), "Create a new Fulfillment";
    modify_fulfillment, MODIFY_FULFILLMENT => "modifyFulfillment", Put, "/admin/orders/{orderId}/fulfillments/{id}.json", Some("fulfillment"), "Modify an existing Fulfillment";
    complete_fulfillment, COMPLETE_FULFILLMENT => "completeFulfillment", Post, "/admin/orders/{orderId}/fulfillments/{id}/complete.json", Some("fulfillment"), "Complete a pending fulfillment";
    cancel_fulfillment, CANCEL_FULFILLMENT => "cancelFulfillment", Post, "/admin/orders/{orderId}/fulfillments/{id}/cancel.json", Some("fulfillment"), "Cancel a pending fulfillment";
    get_refund, GET_REFUND => "getRefund", Get, "/admin/orders/{orderId}/refunds/{id}.json", Some("refund"), "Receive a single Refund";
    get_custom_collections, GET_CUSTOM_COLLECTIONS => "getCustomCollections", Get, "/admin/custom_collections.json", Some("custom_collections"), "Receive a list of all CustomCollections";
    count_custom_collections, COUNT_CUSTOM_COLLECTIONS => "countCustomCollections", Get, "/admin/custom_collections/count.json", Some("count"), "Receive a count of all CustomCollections";
    get_custom_collection, GET_CUSTOM_COLLECTION => "getCustomCollection", Get, "/admin/custom_collections/{id}.json", Some("custom_collection"), "Receive a single CustomCollection";
    create_custom_collection, CREATE_CUSTOM_COLLECTION => "createCustomCollection", Post, "/admin/custom_collections.json", Some("custom_collection"), "Create a new CustomCollection";
    modify_custom_collection, MODIFY_CUSTOM_COLLECTION => "modifyCustomCollection", Put, "/admin/custom_collections/{id}.json", Some("custom_collection"), "Modify an existing CustomCollection";
    remove_custom_collection, REMOVE_CUSTOM_COLLECTION => "removeCustomCollection", Delete, "/admin/custom_collections/{id}.json", None, "Remove a CustomCollection from the database";
    get_fulfillment_services, GET_FULFILLMENT_SERVICES => "getFulfillmentServices", Get, "/admin/fulfillment_services.json", Some("fulfillment_services"), "Receive a list of all FulfillmentServices";
    create_fulfillment_service, CREATE_FULFILLMENT_SERVICE => "createFulfillmentService", Post, "/admin/fulfillment_services.json", Some("fulfillment_service"), "Create a new FulfillmentService";
    get_fulfillment_service, GET_FULFILLMENT_SERVICE => "getFulfillmentService", Get, "/admin/fulfillment_services/{id}.json", Some("fulfillment_service"), "Receive a single FulfillmentService";
    modify_fulfillment_service, MODIFY_FULFILLMENT_SERVICE => "modifyFulfillmentService", Put, "/admin/fulfillment_services/{id}.json", Some("fulfillment_service"), "Modify an existing FulfillmentService";
    remove_fulfillment_service, REMOVE_FULFILLMENT_SERVICE => "removeFulfillmentService", Delete, "/admin/fulfillment_services/{id}.json", None, "Remove a FulfillmentService from the database";
    get_countries, GET_COUNTRIES => "getCountries", Get, "/admin/countries.json", Some("countries"), "Receive a list of all Countries";
    count_countries, COUNT_COUNTRIES => "countCountries", Get, "/admin/countries/count.json", Some("count"), "Receive a count of all Countries";
    get_country, GET_COUNTRY => "getCountry", Get, "/admin/countries/{id}.json", Some("country"), "Receive a single Country";
    create_country, CREATE_COUNTRY => "createCountry", Post, "/admin/countries.json", Some("country"), "Create a new Country";
    modify_country, MODIFY_COUNTRY => "modifyCountry", Put, "/admin/countries/{id}.json", Some("country"), "Modify an existing Country";
    remove_country, REMOVE_COUNTRY => "removeCountry", Delete, "/admin/countries/{id}.json", None, "Remove a Country from the database";
    create_risk, CREATE_RISK => "createRisk", Post, "/admin/orders/{id}/risks.json", Some("risk"), "Create a new Order Risks";
    get_risks, GET_RISKS => "getRisks", Get, "/admin/orders/{id}/risks.json", Some("risks"), "Receive a list of all Order Risks";
    get_risk, GET_RISK => "getRisk", Get, "/admin/orders/{orderId}/risks/{id}.json", Some("risk"), "Receive a single Order Risks";
    modify_risk, MODIFY_RISK => "modifyRisk", Put, "/admin/orders/{orderId}/risks/{id}.json", Some("risk"), "Modify an existing Order Risks";
    get_product_images, GET_PRODUCT_IMAGES => "getProductImages", Get, "/admin/products/{id}/images.json", Some("images"), "Receive a list of all Product Images";
    count_product_images, COUNT_PRODUCT_IMAGES => "countProductImages", Get, "/admin/products/{id}/images/count.json", Some("count"), "Receive a count of all Product Images";
    get_product_image, GET_PRODUCT_IMAGE => "getProductImage", Get, "/admin/products/{productId}/images/{id}.json", Some("image"), "Receive a single Product Image";
    create_product_image, CREATE_PRODUCT_IMAGE => "createProductImage", Post, "/admin/products/{id}/images.json", Some("image"), "Create a new Product Image";
    modify_product_image, MODIFY_PRODUCT_IMAGE => "modifyProductImage", Put, "/admin/products/{productId}/images/{id}.json", Some("image"), "Modify an existing Product Image";
    remove_product_image, REMOVE_PRODUCT_IMAGE => "removeProductImage", Delete, "/admin/products/{productId}/images/{id}.json", None, "Remove a Product Image from the database";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn is_word(s: &str) -> bool {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    #[test]
    fn test_names_are_unique() {
        let mut seen = HashSet::new();
        for endpoint in ENDPOINTS {
            assert!(seen.insert(endpoint.name), "duplicate {}", endpoint.name);
        }
    }

    #[test]
    fn test_placeholders_and_unwrap_keys_are_identifiers() {
        for endpoint in ENDPOINTS {
            assert!(endpoint.path.starts_with("/admin/"), "{}", endpoint.name);
            assert!(endpoint.path.ends_with(".json"), "{}", endpoint.name);
            assert_eq!(
                endpoint.path.matches('{').count(),
                endpoint.path_params().len(),
                "{}",
                endpoint.name
            );
            for param in endpoint.path_params() {
                assert!(is_word(param), "{}: {param}", endpoint.name);
            }
            if let Some(key) = endpoint.unwrap_key {
                assert!(is_word(key), "{}: {key}", endpoint.name);
            }
        }
    }

    #[test]
    fn test_fetch_all_pairs_exist() {
        for (count, list) in [
            (&COUNT_ORDERS, &GET_ORDERS),
            (&COUNT_PRODUCTS, &GET_PRODUCTS),
            (&COUNT_COLLECTS, &GET_COLLECTS),
        ] {
            assert_eq!(count.unwrap_key, Some("count"));
            assert_eq!(count.method, HttpMethod::Get);
            assert_eq!(list.method, HttpMethod::Get);
            assert!(list.path_params().is_empty());
        }
    }

    #[test]
    fn test_find_endpoint() {
        assert_eq!(find_endpoint("getOrder"), Some(&GET_ORDER));
        assert_eq!(GET_ORDER.path, "/admin/orders/{id}.json");
        assert!(find_endpoint("nope").is_none());
    }
}
