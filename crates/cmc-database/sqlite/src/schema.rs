/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

diesel::table! {
    use diesel::sql_types::*;

    prices (id) {
        id -> BigInt,
        name -> Text,
        symbol -> Text,
        slug -> Text,
        cmc_rank -> Nullable<BigInt>,
        date_added -> Nullable<Text>,
        max_supply -> Nullable<Double>,
        circulating_supply -> Nullable<Double>,
        total_supply -> Nullable<Double>,
        last_updated -> Nullable<Text>,
        price -> Nullable<Double>,
        percent_change_1h -> Nullable<Double>,
        percent_change_24h -> Nullable<Double>,
        percent_change_7d -> Nullable<Double>,
        percent_change_30d -> Nullable<Double>,
        percent_change_60d -> Nullable<Double>,
        percent_change_90d -> Nullable<Double>,
    }
}

diesel::table! {
    use diesel::sql_types::*;

    info (id) {
        id -> BigInt,
        name -> Text,
        symbol -> Text,
        category -> Nullable<Text>,
        description -> Nullable<Text>,
        slug -> Text,
        logo -> Nullable<Text>,
        subreddit -> Nullable<Text>,
        notice -> Nullable<Text>,
        urls -> Nullable<Text>,
        platform -> Nullable<Text>,
        twitter_username -> Nullable<Text>,
        date_launched -> Nullable<Text>,
        contract_address -> Nullable<Text>,
        status -> Nullable<Text>,
    }
}

diesel::joinable!(info -> prices (id));

diesel::allow_tables_to_appear_in_same_query!(info, prices,);
